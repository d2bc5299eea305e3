//! # Cluster Protocol
//!
//! Composite sub-block cluster core: several independently-defined sub-block
//! behaviors fused into one logical unit, with hook dispatch routed only to
//! the elements that opted in, and the whole element list kept durable and
//! synchronized through a dual serialization protocol.
//!
//! ## Components
//! - **Core**: dense bit codec, fixed bit-width table, persistent tag format
//! - **Protocol**: hook kinds, type registry, sub-element contract, cluster
//!
//! ## Example
//! ```rust
//! use std::any::Any;
//! use std::sync::Arc;
//! use cluster_protocol::{
//!     Anchor, BlockPos, Cluster, ClusterRegistry, HookSet, Side, SubElement, WorldHandle,
//! };
//!
//! struct Emitter { meta: u8 }
//!
//! impl SubElement for Emitter {
//!     fn metadata(&self) -> u8 { self.meta }
//!     fn set_metadata(&mut self, meta: u8) { self.meta = meta; }
//!     fn weak_power(&self, _side: u8) -> u8 { 7 }
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn as_any_mut(&mut self) -> &mut dyn Any { self }
//! }
//!
//! let mut builder = ClusterRegistry::builder();
//! let emitter = builder.register("emitter", HookSet::WEAK_POWER, || {
//!     Box::new(Emitter { meta: 0 })
//! });
//! let registry = Arc::new(builder.build());
//!
//! let anchor = Anchor::new(WorldHandle(0), BlockPos::new(0, 64, 0));
//! let mut cluster = Cluster::new(registry, Side::Server, anchor);
//! cluster.load(&[emitter]).unwrap();
//! assert_eq!(cluster.weak_power(2), 7);
//! ```
//!
//! ## Model
//! The core is single-threaded and tick-driven: the host runtime calls into
//! a cluster synchronously, one world tick at a time. Sync payloads are
//! treated as immutable, fully-received units before decoding begins.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;

pub use crate::core::bits::{BitReader, BitWriter};
pub use crate::core::tag::{Compound, TagValue};
pub use crate::core::widths::DataWidth;
pub use crate::error::{ClusterError, Result};
pub use crate::protocol::cluster::{Cluster, Side, SyncOutcome, TickAction};
pub use crate::protocol::element::{
    Anchor, BlockPos, ContainerHandle, GuiHandle, Interaction, InterfaceElement, SubElement,
    WorldHandle,
};
pub use crate::protocol::hooks::{Aggregation, HookKind, HookSet};
pub use crate::protocol::registry::{ClusterRegistry, RegistryBuilder, TypeDescriptor};
