//! # Cluster Protocol Components
//!
//! Capability registry, sub-element contract, and the composite cluster
//! entity that ties them together.
//!
//! ## Components
//! - **Hooks**: the closed set of dispatchable behavior points
//! - **Registry**: ordered, positionally-addressed type catalog
//! - **Element**: the sub-block contract and interface capability
//! - **Cluster**: dispatch, persistence, and synchronization

pub mod cluster;
pub mod element;
pub mod hooks;
pub mod registry;
