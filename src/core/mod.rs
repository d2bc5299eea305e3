//! # Core Codec Components
//!
//! Low-level encoding for cluster state: the dense bit stream used on the
//! wire and the structured tag format used for durable storage.
//!
//! ## Components
//! - **Bits**: `BitWriter`/`BitReader` cursors over a bit-addressable buffer
//! - **Widths**: the fixed per-field bit-width table
//! - **Tag**: NBT-style compounds for persistence
//!
//! ## Wire Format
//! ```text
//! [count: ClusterSubId] [count x type_id: ClusterSubId] [count x meta: BlockMeta]
//! ```
//!
//! The stream is not byte-aligned; consecutive fields of different widths
//! pack back to back. Both sides must consume the exact width sequence the
//! producer wrote.

pub mod bits;
pub mod tag;
pub mod widths;
