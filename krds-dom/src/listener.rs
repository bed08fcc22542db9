use std::fmt;
use std::rc::Rc;

use crate::document::{Document, NodeId};
use crate::event::{EventState, KeyboardEvent, MouseEvent};

/// Handle to one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The document itself, above `body`. Sees every connected event.
    Document,
    Node(NodeId),
}

/// Phase a listener is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListenerPhase {
    Capture,
    #[default]
    Bubble,
}

pub(crate) type KeyCallback = Rc<dyn Fn(&mut KeyboardEvent)>;
pub(crate) type ClickCallback = Rc<dyn Fn(&mut MouseEvent)>;

#[derive(Clone)]
pub(crate) enum Callback {
    Key(KeyCallback),
    Click(ClickCallback),
}

struct Entry {
    id: ListenerId,
    target: ListenerTarget,
    phase: ListenerPhase,
    callback: Callback,
}

/// Per-document listener table. Entries are kept in registration order,
/// which is also invocation order for one target and phase.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Registry {
    pub(crate) fn add(
        &mut self,
        target: ListenerTarget,
        phase: ListenerPhase,
        callback: Callback,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            target,
            phase,
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Snapshot the callbacks for one target and phase so they can run
    /// without the registry borrowed.
    pub(crate) fn matching<E: Dispatch>(
        &self,
        target: ListenerTarget,
        phase: ListenerPhase,
    ) -> Vec<(ListenerId, Rc<dyn Fn(&mut E)>)> {
        self.entries
            .iter()
            .filter(|entry| entry.target == target && entry.phase == phase)
            .filter_map(|entry| E::callback(&entry.callback).map(|cb| (entry.id, cb)))
            .collect()
    }
}

/// Event types the document knows how to route.
pub(crate) trait Dispatch {
    fn callback(callback: &Callback) -> Option<Rc<dyn Fn(&mut Self)>>;
    fn state(&mut self) -> &mut EventState;
}

impl Dispatch for KeyboardEvent {
    fn callback(callback: &Callback) -> Option<Rc<dyn Fn(&mut Self)>> {
        match callback {
            Callback::Key(cb) => Some(Rc::clone(cb)),
            Callback::Click(_) => None,
        }
    }

    fn state(&mut self) -> &mut EventState {
        &mut self.state
    }
}

impl Dispatch for MouseEvent {
    fn callback(callback: &Callback) -> Option<Rc<dyn Fn(&mut Self)>> {
        match callback {
            Callback::Click(cb) => Some(Rc::clone(cb)),
            Callback::Key(_) => None,
        }
    }

    fn state(&mut self) -> &mut EventState {
        &mut self.state
    }
}

/// Owns a listener registration and removes it when dropped.
///
/// This is the only way the composables hold listeners, so every exit path
/// (explicit detach, teardown, or the owner simply going away) releases the
/// registration.
#[must_use = "dropping the guard removes the listener immediately"]
pub struct ListenerGuard {
    document: Document,
    id: ListenerId,
}

impl ListenerGuard {
    pub fn new(document: Document, id: ListenerId) -> Self {
        Self { document, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.document.remove_listener(self.id);
    }
}
