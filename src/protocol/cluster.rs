//! # Composite Cluster Entity
//!
//! Owns an ordered list of sub-elements, dispatches hook invocations to the
//! subset whose type opted in, and owns both serialization codecs for the
//! whole list.
//!
//! ## Dispatch
//! Every hook call filters the cluster's *current* element list against the
//! registry's declared capabilities, in element order. Boolean hooks OR with
//! short-circuit, power hooks take the maximum from a zero baseline, and
//! notification hooks fan out unconditionally. The scan is O(elements) per
//! call; clusters are bounded by the wire id width, so this is tick-driven
//! small-n work, not a hot path.
//!
//! ## Dual codec
//! - **Persistence** interleaves per-element records `(type id, metadata,
//!   content)` inside a tag compound and rebuilds in two passes: every
//!   element is instantiated before any element-specific content is applied.
//! - **Sync** packs three homogeneous runs (`count`, all ids, all metadata)
//!   into a dense bit stream at the widths fixed by [`DataWidth`].
//!
//! ## State request protocol
//! A non-authoritative cluster starts empty and asks for full state exactly
//! once, on its first tick. The authoritative side answers *any* inbound
//! payload with a fresh full-state encode; it does not distinguish a request
//! from a push.

use std::sync::Arc;

use tracing::{debug, instrument, trace, warn};

use crate::config::{
    MAX_CLUSTER_ELEMENTS, TAG_CABLE, TAG_SUB_BLOCKS, TAG_SUB_ID, TAG_SUB_META, TAG_TYPES,
};
use crate::core::bits::{BitReader, BitWriter};
use crate::core::tag::{Compound, TagValue};
use crate::core::widths::DataWidth;
use crate::error::{ClusterError, Result};
use crate::protocol::element::{
    Anchor, ContainerHandle, GuiHandle, Interaction, InterfaceElement, SubElement,
};
use crate::protocol::hooks::HookKind;
use crate::protocol::registry::ClusterRegistry;

/// Which peer this cluster instance lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Authoritative holder of the true state.
    Server,
    /// Mirror that must request state before it has any elements.
    Client,
}

impl Side {
    pub fn is_authoritative(self) -> bool {
        matches!(self, Side::Server)
    }
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    None,
    /// Send one empty payload to the authoritative side.
    RequestState,
}

/// What the host should do after feeding an inbound payload to [`Cluster::read_sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Authoritative side: answer with a fresh [`Cluster::write_sync`] payload.
    ReplyFullState,
    /// Non-authoritative side: the payload was decoded and applied.
    Applied,
}

/// Composite capability-dispatch entity.
pub struct Cluster {
    registry: Arc<ClusterRegistry>,
    side: Side,
    anchor: Anchor,
    elements: Vec<Box<dyn SubElement>>,
    type_ids: Vec<u8>,
    // index into `elements`; only the relay currently carries an interface
    interface_slot: Option<usize>,
    requested_state: bool,
}

impl Cluster {
    pub fn new(registry: Arc<ClusterRegistry>, side: Side, anchor: Anchor) -> Self {
        Self {
            registry,
            side,
            anchor,
            elements: Vec::new(),
            type_ids: Vec::new(),
            interface_slot: None,
            requested_state: false,
        }
    }

    /// Replaces the whole element list from an ordered type id sequence.
    ///
    /// All ids are resolved before any state is touched, so a stale or
    /// corrupted id leaves the cluster exactly as it was. Each new element
    /// is bound to this cluster's anchor and marked cluster-hosted; the
    /// first one exposing the interface capability claims the single
    /// interface slot, later ones are shadowed.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub fn load(&mut self, ids: &[u8]) -> Result<()> {
        if ids.len() > MAX_CLUSTER_ELEMENTS {
            return Err(ClusterError::OversizedCluster {
                len: ids.len(),
                max: MAX_CLUSTER_ELEMENTS,
            });
        }

        let registry = Arc::clone(&self.registry);
        let descriptors = ids
            .iter()
            .map(|&id| {
                registry.resolve(id).map_err(|e| {
                    warn!(id, "refusing to load cluster with unknown type id");
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.elements.clear();
        self.type_ids.clear();
        self.interface_slot = None;

        for (slot, descriptor) in descriptors.into_iter().enumerate() {
            let mut element = descriptor.instantiate();
            element.attach(self.anchor);
            element.set_part_of_cluster(true);
            if self.interface_slot.is_none() && element.as_interface().is_some() {
                self.interface_slot = Some(slot);
            }
            self.type_ids.push(descriptor.id());
            self.elements.push(element);
        }

        debug!(
            elements = self.elements.len(),
            interface_slot = ?self.interface_slot,
            "cluster rebuilt"
        );
        Ok(())
    }

    /// Placement path: reads the ordered type list from an item's tag.
    ///
    /// Items without cluster data leave the entity untouched; a cable
    /// compound without a type array loads an empty cluster.
    pub fn load_from_item(&mut self, item_tag: &Compound) -> Result<()> {
        let Ok(cable) = item_tag.compound(TAG_CABLE) else {
            return Ok(());
        };
        let types = cable.byte_array(TAG_TYPES).unwrap_or(&[]).to_vec();
        self.load(&types)
    }

    /// Element indices participating in `hook`, in element order.
    fn participants(&self, hook: HookKind) -> Vec<usize> {
        let hits: Vec<usize> = self
            .type_ids
            .iter()
            .enumerate()
            .filter(|&(_, &id)| self.registry.hooks_of(id).contains(hook.flag()))
            .map(|(slot, _)| slot)
            .collect();
        trace!(?hook, participants = hits.len(), "dispatch filter");
        hits
    }

    pub fn on_placed(&mut self) {
        for slot in self.participants(HookKind::OnPlaced) {
            self.elements[slot].on_placed();
        }
    }

    pub fn on_neighbor_change(&mut self, source_id: u32) {
        for slot in self.participants(HookKind::OnNeighborChange) {
            self.elements[slot].on_neighbor_change(source_id);
        }
    }

    pub fn on_added(&mut self) {
        for slot in self.participants(HookKind::OnAdded) {
            self.elements[slot].on_added();
        }
    }

    pub fn can_connect_redstone(&self, side: u8) -> bool {
        self.participants(HookKind::CanConnectRedstone)
            .into_iter()
            .any(|slot| self.elements[slot].can_connect_redstone(side))
    }

    pub fn should_check_weak_power(&self, side: u8) -> bool {
        self.participants(HookKind::ShouldCheckWeakPower)
            .into_iter()
            .any(|slot| self.elements[slot].should_check_weak_power(side))
    }

    pub fn weak_power(&self, side: u8) -> u8 {
        self.participants(HookKind::WeakPower)
            .into_iter()
            .fold(0, |max, slot| max.max(self.elements[slot].weak_power(side)))
    }

    pub fn strong_power(&self, side: u8) -> u8 {
        self.participants(HookKind::StrongPower)
            .into_iter()
            .fold(0, |max, slot| {
                max.max(self.elements[slot].strong_power(side))
            })
    }

    /// First participating element that handles the interaction wins;
    /// everything after it is suppressed.
    pub fn on_activated(&mut self, interaction: &Interaction) -> bool {
        for slot in self.participants(HookKind::OnActivated) {
            if self.elements[slot].on_activated(interaction) {
                return true;
            }
        }
        false
    }

    /// Ticks every element in order. On the non-authoritative side the
    /// first tick also asks the host to request full state, exactly once.
    #[must_use]
    pub fn update(&mut self) -> TickAction {
        for element in &mut self.elements {
            element.tick();
        }

        if !self.side.is_authoritative() && !self.requested_state {
            self.requested_state = true;
            debug!("requesting full cluster state");
            return TickAction::RequestState;
        }
        TickAction::None
    }

    fn interface_element(&self) -> Option<&dyn InterfaceElement> {
        self.interface_slot
            .and_then(|slot| self.elements[slot].as_interface())
    }

    fn interface_element_mut(&mut self) -> Option<&mut dyn InterfaceElement> {
        self.interface_slot
            .and_then(|slot| self.elements[slot].as_interface_mut())
    }

    pub fn container(&self) -> Option<ContainerHandle> {
        self.interface_element().and_then(|element| element.container())
    }

    pub fn gui(&self) -> Option<GuiHandle> {
        self.interface_element().and_then(|element| element.gui())
    }

    pub fn write_all_data(&self, writer: &mut BitWriter) {
        if let Some(element) = self.interface_element() {
            element.write_all_data(writer);
        }
    }

    pub fn read_all_data(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        match self.interface_element_mut() {
            Some(element) => element.read_all_data(reader),
            None => Ok(()),
        }
    }

    pub fn read_updated_data(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        match self.interface_element_mut() {
            Some(element) => element.read_updated_data(reader),
            None => Ok(()),
        }
    }

    /// Writes the durable form: one record per element, in element order,
    /// each carrying the type id, the metadata byte, and whatever content
    /// the element itself chooses to store.
    pub fn write_persistent(&self, tag: &mut Compound) {
        let mut records = Vec::with_capacity(self.elements.len());
        for (element, &id) in self.elements.iter().zip(&self.type_ids) {
            let mut sub = Compound::new();
            sub.set_byte(TAG_SUB_ID, id);
            sub.set_byte(TAG_SUB_META, element.metadata());
            element.write_content(&mut sub);
            records.push(TagValue::Compound(sub));
        }
        tag.set_list(TAG_SUB_BLOCKS, records);
    }

    /// Restores the durable form in two passes: first every type id is
    /// collected and the whole list rebuilt, then metadata and content are
    /// applied to the live elements. Content deserialization assumes a
    /// constructed element, so the rebuild must finish first.
    #[instrument(skip_all)]
    pub fn read_persistent(&mut self, tag: &Compound) -> Result<()> {
        let records = tag.list(TAG_SUB_BLOCKS)?;

        let mut ids = Vec::with_capacity(records.len());
        let mut subs = Vec::with_capacity(records.len());
        for record in records {
            let TagValue::Compound(sub) = record else {
                return Err(ClusterError::WrongTagType {
                    key: TAG_SUB_BLOCKS.to_string(),
                    expected: "compound",
                });
            };
            ids.push(sub.byte(TAG_SUB_ID)?);
            subs.push(sub);
        }

        self.load(&ids)?;
        for (element, sub) in self.elements.iter_mut().zip(subs) {
            element.set_metadata(sub.byte(TAG_SUB_META)?);
            element.read_content(sub);
        }
        Ok(())
    }

    /// Encodes the sync payload. The authoritative side writes the element
    /// count, every type id, then every metadata value as three homogeneous
    /// runs; the non-authoritative side writes nothing, an empty payload
    /// being a pure "I need state" signal.
    pub fn write_sync(&self, writer: &mut BitWriter) {
        if !self.side.is_authoritative() {
            return;
        }
        writer.write(self.elements.len() as u32, DataWidth::ClusterSubId);
        for &id in &self.type_ids {
            writer.write(u32::from(id), DataWidth::ClusterSubId);
        }
        for element in &self.elements {
            writer.write(u32::from(element.metadata()), DataWidth::BlockMeta);
        }
        trace!(bits = writer.bit_len(), "encoded sync payload");
    }

    /// Consumes an inbound sync payload.
    ///
    /// On the authoritative side any inbound message, request or push, means
    /// the peer needs the current state, so the caller is told to reply with
    /// a full encode. On the non-authoritative side the payload is decoded
    /// and the element list rebuilt.
    #[instrument(skip(self, reader))]
    pub fn read_sync(&mut self, reader: &mut BitReader<'_>) -> Result<SyncOutcome> {
        if self.side.is_authoritative() {
            return Ok(SyncOutcome::ReplyFullState);
        }

        let count = reader.read(DataWidth::ClusterSubId)? as usize;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(reader.read(DataWidth::ClusterSubId)? as u8);
        }
        self.load(&ids)?;
        for slot in 0..count {
            let meta = reader.read(DataWidth::BlockMeta)? as u8;
            self.elements[slot].set_metadata(meta);
        }
        Ok(SyncOutcome::Applied)
    }

    /// Exact bit length of the payload [`Cluster::write_sync`] would
    /// produce, precomputed from the width table.
    pub fn sync_bit_length(&self) -> usize {
        if !self.side.is_authoritative() {
            return 0;
        }
        let id = DataWidth::ClusterSubId.bit_count() as usize;
        let meta = DataWidth::BlockMeta.bit_count() as usize;
        id + self.elements.len() * (id + meta)
    }

    /// First hosted element of concrete type `T`, in element order.
    pub fn find_element<T: SubElement + 'static>(&self) -> Option<&T> {
        self.elements
            .iter()
            .find_map(|element| element.as_any().downcast_ref::<T>())
    }

    pub fn find_element_mut<T: SubElement + 'static>(&mut self) -> Option<&mut T> {
        self.elements
            .iter_mut()
            .find_map(|element| element.as_any_mut().downcast_mut::<T>())
    }

    pub fn elements(&self) -> &[Box<dyn SubElement>] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Box<dyn SubElement>] {
        &mut self.elements
    }

    pub fn type_ids(&self) -> &[u8] {
        &self.type_ids
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Whether the one-shot state request has already been issued.
    pub fn has_requested_state(&self) -> bool {
        self.requested_state
    }
}

impl std::fmt::Debug for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cluster")
            .field("side", &self.side)
            .field("anchor", &self.anchor)
            .field("type_ids", &self.type_ids)
            .field("interface_slot", &self.interface_slot)
            .field("requested_state", &self.requested_state)
            .finish_non_exhaustive()
    }
}
