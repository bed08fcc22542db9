use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use krds_dom::NodeId;

use crate::Scope;

/// A shared slot the host fills with a mounted node.
///
/// Clones observe the same slot. The slot is empty before the owning
/// component mounts and again after it unmounts; composables read it on
/// every event instead of caching the node.
#[derive(Clone, Default)]
pub struct ElementRef {
    slot: Rc<Cell<Option<NodeId>>>,
}

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ref that already points at `node`.
    pub fn bound(node: NodeId) -> Self {
        let element = Self::new();
        element.set(node);
        element
    }

    pub fn get(&self) -> Option<NodeId> {
        self.slot.get()
    }

    pub fn set(&self, node: NodeId) {
        self.slot.set(Some(node));
    }

    pub fn clear(&self) {
        self.slot.set(None);
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Fill the slot when `scope` mounts and empty it when it unmounts.
    pub fn track(&self, scope: &Scope, node: NodeId) {
        let on_mount = self.clone();
        scope.on_mounted(move || on_mount.set(node));
        let on_unmount = self.clone();
        scope.on_before_unmount(move || on_unmount.clear());
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementRef").field(&self.slot.get()).finish()
    }
}
