//! Fixed per-field bit widths for the sync payload.
//!
//! Each width exactly bounds the legal range of its field, so callers never
//! need range checks beyond picking the right tag. The table is part of the
//! wire contract: changing a width is a protocol break for every peer and
//! every piece of persisted data encoded with it.

/// Logical field tags and their encoded widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataWidth {
    /// Registry type id, also the element count field.
    ClusterSubId,
    /// Sub-block metadata nibble.
    BlockMeta,
    /// Block face index, 0..=5.
    Side,
    /// Single-bit flag inside interface payloads.
    Boolean,
}

impl DataWidth {
    /// Number of bits this field occupies in the stream.
    pub const fn bit_count(self) -> u32 {
        match self {
            DataWidth::ClusterSubId => 4,
            DataWidth::BlockMeta => 4,
            DataWidth::Side => 3,
            DataWidth::Boolean => 1,
        }
    }
}
