//! # Error Types
//!
//! Error handling for the cluster core.
//!
//! This module defines all error variants that can occur while decoding
//! cluster state, from short bit streams to registry mismatches.
//!
//! ## Error Categories
//! - **Protocol/version mismatch**: A type id resolves outside the registry's
//!   bounds. Continuing would silently misinterpret every subsequent field,
//!   so the decode is aborted.
//! - **Short/malformed payload**: The bit stream or tag compound is exhausted
//!   or shaped wrong before the declared field count is satisfied.
//! - **Serialization**: Byte-level encode/decode of persistent tags failed.
//!
//! A failed decode aborts the operation for that cluster only; the registry
//! and sibling clusters are unaffected.

use thiserror::Error;

// ClusterError is the primary error type for all cluster operations
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("unknown sub-block type id: {0}")]
    UnknownTypeId(u8),

    #[error("bit stream exhausted: needed {needed} bits, {remaining} remaining")]
    ShortPayload { needed: usize, remaining: usize },

    #[error("cluster holds {len} elements, maximum is {max}")]
    OversizedCluster { len: usize, max: usize },

    #[error("missing tag: {0}")]
    MissingTag(String),

    #[error("tag {key:?} is not a {expected}")]
    WrongTagType { key: String, expected: &'static str },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Type alias for Results using ClusterError
pub type Result<T> = std::result::Result<T, ClusterError>;
