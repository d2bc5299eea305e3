//! # Capability Registry
//!
//! Ordered catalog of sub-block type descriptors.
//!
//! The catalog is addressed positionally: a descriptor's id is its insertion
//! index, and that index is what gets persisted and sent over the wire.
//! Reordering or removing entries is a protocol break for all existing data.
//!
//! The registry is built once at startup, read-only afterwards, and shared
//! via `Arc`. Per-hook descriptor lists are precomputed at build time so
//! dispatch filtering never rescans the catalog.

use std::fmt;

use tracing::debug;

use crate::config::MAX_CLUSTER_TYPES;
use crate::error::{ClusterError, Result};
use crate::protocol::element::SubElement;
use crate::protocol::hooks::{HookKind, HookSet};

type ElementFactory = Box<dyn Fn() -> Box<dyn SubElement> + Send + Sync>;

/// Registry entry: a sub-block type's stable id, factory, and declared
/// hook capabilities.
pub struct TypeDescriptor {
    id: u8,
    name: &'static str,
    hooks: HookSet,
    factory: ElementFactory,
}

impl TypeDescriptor {
    /// Stable small-integer id, valid as an index into the catalog.
    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn hooks(&self) -> HookSet {
        self.hooks
    }

    pub fn handles(&self, hook: HookKind) -> bool {
        self.hooks.contains(hook.flag())
    }

    /// Instantiates a fresh element of this type.
    pub fn instantiate(&self) -> Box<dyn SubElement> {
        (self.factory)()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

/// Collects descriptors before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<TypeDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sub-block type and returns its assigned id.
    ///
    /// # Panics
    /// Panics when the catalog already holds [`MAX_CLUSTER_TYPES`] entries:
    /// ids past that point are not encodable at the wire field width, so
    /// this is a build-time configuration error, not a runtime condition.
    pub fn register<F>(&mut self, name: &'static str, hooks: HookSet, factory: F) -> u8
    where
        F: Fn() -> Box<dyn SubElement> + Send + Sync + 'static,
    {
        assert!(
            self.entries.len() < MAX_CLUSTER_TYPES,
            "registry full: {MAX_CLUSTER_TYPES} sub-block types already registered"
        );
        let id = self.entries.len() as u8;
        self.entries.push(TypeDescriptor {
            id,
            name,
            hooks,
            factory: Box::new(factory),
        });
        debug!(id, name, ?hooks, "registered sub-block type");
        id
    }

    /// Freezes the catalog and precomputes the per-hook descriptor lists.
    pub fn build(self) -> ClusterRegistry {
        let mut by_hook: [Vec<u8>; HookKind::ALL.len()] = Default::default();
        for entry in &self.entries {
            for kind in HookKind::ALL {
                if entry.handles(kind) {
                    by_hook[kind.index()].push(entry.id);
                }
            }
        }
        ClusterRegistry {
            entries: self.entries,
            by_hook,
        }
    }
}

/// Process-wide, read-only catalog of sub-block types.
#[derive(Debug)]
pub struct ClusterRegistry {
    entries: Vec<TypeDescriptor>,
    by_hook: [Vec<u8>; HookKind::ALL.len()],
}

impl ClusterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolves a type id to its descriptor.
    ///
    /// An out-of-range id means stale or corrupted data relative to this
    /// registry and is surfaced, never silently defaulted.
    pub fn resolve(&self, id: u8) -> Result<&TypeDescriptor> {
        self.entries
            .get(id as usize)
            .ok_or(ClusterError::UnknownTypeId(id))
    }

    /// Capability set for a type id; empty for out-of-range ids.
    pub fn hooks_of(&self, id: u8) -> HookSet {
        self.entries
            .get(id as usize)
            .map_or_else(HookSet::empty, |entry| entry.hooks)
    }

    /// Descriptors participating in `hook`, in catalog order.
    pub fn descriptors_with(&self, hook: HookKind) -> impl Iterator<Item = &TypeDescriptor> {
        self.by_hook[hook.index()]
            .iter()
            .map(|&id| &self.entries[id as usize])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::protocol::element::SubElement;
    use std::any::Any;

    struct Blank {
        meta: u8,
    }

    impl SubElement for Blank {
        fn metadata(&self) -> u8 {
            self.meta
        }
        fn set_metadata(&mut self, meta: u8) {
            self.meta = meta;
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn blank() -> Box<dyn SubElement> {
        Box::new(Blank { meta: 0 })
    }

    #[test]
    fn ids_are_insertion_indices() {
        let mut builder = ClusterRegistry::builder();
        assert_eq!(builder.register("a", HookSet::empty(), blank), 0);
        assert_eq!(builder.register("b", HookSet::ON_ADDED, blank), 1);
        let registry = builder.build();
        assert_eq!(registry.resolve(1).unwrap().name(), "b");
    }

    #[test]
    fn out_of_range_id_is_surfaced() {
        let registry = ClusterRegistry::builder().build();
        assert!(matches!(
            registry.resolve(0),
            Err(ClusterError::UnknownTypeId(0))
        ));
        assert_eq!(registry.hooks_of(9), HookSet::empty());
    }

    #[test]
    fn per_hook_view_is_ordered_and_filtered() {
        let mut builder = ClusterRegistry::builder();
        builder.register("a", HookSet::WEAK_POWER, blank);
        builder.register("b", HookSet::ON_ADDED, blank);
        builder.register("c", HookSet::WEAK_POWER | HookSet::ON_ADDED, blank);
        let registry = builder.build();

        let ids: Vec<u8> = registry
            .descriptors_with(HookKind::WeakPower)
            .map(TypeDescriptor::id)
            .collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    #[should_panic(expected = "registry full")]
    fn registration_past_capacity_panics() {
        let mut builder = ClusterRegistry::builder();
        for _ in 0..=MAX_CLUSTER_TYPES {
            builder.register("x", HookSet::empty(), blank);
        }
    }
}
