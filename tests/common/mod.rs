//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use cluster_protocol::{
    Anchor, BlockPos, ClusterRegistry, HookSet, SubElement, WorldHandle,
};

/// Element with no behavior beyond its metadata byte.
pub struct NullElement {
    meta: u8,
}

impl SubElement for NullElement {
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

/// Registry of `types` interchangeable null elements, ids `0..types`.
pub fn null_registry(types: usize) -> Arc<ClusterRegistry> {
    let mut builder = ClusterRegistry::builder();
    for _ in 0..types {
        builder.register("null", HookSet::empty(), || {
            Box::new(NullElement { meta: 0 })
        });
    }
    Arc::new(builder.build())
}

pub fn anchor() -> Anchor {
    Anchor::new(WorldHandle(7), BlockPos::new(0, 80, 16))
}
