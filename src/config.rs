//! # Protocol Constants
//!
//! Fixed limits and tag keys shared by the wire and persistence formats.
//!
//! All limits derive from the bit-width table: widening a field in
//! [`DataWidth`](crate::core::widths::DataWidth) automatically widens the
//! corresponding limit here.

use crate::core::widths::DataWidth;

/// Number of distinct sub-block types addressable on the wire.
pub const MAX_CLUSTER_TYPES: usize = 1 << DataWidth::ClusterSubId.bit_count();

/// Largest element count encodable in the sync payload's count field.
pub const MAX_CLUSTER_ELEMENTS: usize = MAX_CLUSTER_TYPES - 1;

/// Persistent tag key for the per-element record list.
pub const TAG_SUB_BLOCKS: &str = "SubBlocks";

/// Persistent tag key for an element's registry type id.
pub const TAG_SUB_ID: &str = "SubId";

/// Persistent tag key for an element's metadata byte.
pub const TAG_SUB_META: &str = "SubMeta";

/// Item tag key holding the placement-time cluster description.
pub const TAG_CABLE: &str = "Cable";

/// Item tag key for the ordered type id byte array.
pub const TAG_TYPES: &str = "Types";
