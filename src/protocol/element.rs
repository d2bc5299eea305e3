//! # Sub-Element Contract
//!
//! The unit of composition hosted inside a cluster.
//!
//! Each element is instantiated from a registry descriptor, exclusively
//! owned by one cluster, and carries a non-owning copy of that cluster's
//! spatial identity. Hook methods default to no-ops so an element only
//! implements the behavior points its descriptor declares.

use std::any::Any;

use crate::core::bits::{BitReader, BitWriter};
use crate::core::tag::Compound;
use crate::error::Result;

/// Non-owning handle to the hosting world. The host runtime defines what
/// the value means; the cluster core only copies it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldHandle(pub u64);

/// Block coordinates inside a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// The cluster's spatial identity, copied into each hosted element.
/// A plain value, not a second ownership edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub world: WorldHandle,
    pub pos: BlockPos,
}

impl Anchor {
    pub const fn new(world: WorldHandle, pos: BlockPos) -> Self {
        Self { world, pos }
    }
}

/// Arguments to an activation/interaction query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Block face index, 0..=5.
    pub side: u8,
    /// Hit position within the block face.
    pub hit: [f32; 3],
}

/// Opaque handle to a host-side container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHandle(pub u32);

/// Opaque handle to a host-side GUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuiHandle(pub u32);

/// One behavior unit hosted inside a cluster.
///
/// Implementations override only the hooks their registry descriptor
/// declares; undeclared hooks are never dispatched to them anyway.
pub trait SubElement: Send {
    /// Current metadata nibble, synchronized verbatim over the wire.
    fn metadata(&self) -> u8;

    fn set_metadata(&mut self, meta: u8);

    /// Binds the element to its cluster's spatial identity.
    fn attach(&mut self, _anchor: Anchor) {}

    /// Marks the element as cluster-hosted so it suppresses any standalone
    /// behavior it would exhibit when placed alone.
    fn set_part_of_cluster(&mut self, _part_of_cluster: bool) {}

    /// Per-tick update, invoked synchronously in element order. Must not
    /// block: a slow element stalls the whole cluster tick.
    fn tick(&mut self) {}

    fn on_placed(&mut self) {}

    fn on_neighbor_change(&mut self, _source_id: u32) {}

    fn can_connect_redstone(&self, _side: u8) -> bool {
        false
    }

    fn on_added(&mut self) {}

    fn should_check_weak_power(&self, _side: u8) -> bool {
        false
    }

    fn weak_power(&self, _side: u8) -> u8 {
        0
    }

    fn strong_power(&self, _side: u8) -> u8 {
        0
    }

    /// Returns `true` if the interaction was handled, suppressing any
    /// subsequent handler in the cluster.
    fn on_activated(&mut self, _interaction: &Interaction) -> bool {
        false
    }

    /// Writes element-specific content into its persistence record.
    fn write_content(&self, _tag: &mut Compound) {}

    /// Restores element-specific content. Only called on a freshly
    /// constructed element, after the whole cluster has been rebuilt.
    fn read_content(&mut self, _tag: &Compound) {}

    /// The single-owner interface capability. At most one element per
    /// cluster is ever asked for container/GUI state.
    fn as_interface(&self) -> Option<&dyn InterfaceElement> {
        None
    }

    fn as_interface_mut(&mut self) -> Option<&mut dyn InterfaceElement> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Container/GUI provider surface, forwarded verbatim by the cluster.
pub trait InterfaceElement {
    fn container(&self) -> Option<ContainerHandle> {
        None
    }

    fn gui(&self) -> Option<GuiHandle> {
        None
    }

    /// Encodes the full interface state for a newly attached viewer.
    fn write_all_data(&self, _writer: &mut BitWriter) {}

    /// Applies a full interface state payload.
    fn read_all_data(&mut self, _reader: &mut BitReader) -> Result<()> {
        Ok(())
    }

    /// Applies an incremental interface update.
    fn read_updated_data(&mut self, _reader: &mut BitReader) -> Result<()> {
        Ok(())
    }
}
