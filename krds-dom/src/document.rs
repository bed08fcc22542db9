use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::element::{Element, Tag};
use crate::error::DomError;
use crate::event::{EventPhase, KeyboardEvent, MouseButton, MouseEvent};
use crate::focus;
use crate::listener::{
    Callback, Dispatch, ListenerGuard, ListenerId, ListenerPhase, ListenerTarget, Registry,
};

/// Identifier of a mounted node. Only meaningful for the document that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a top-layer entry. See [`Document::enter_top_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) tag: Tag,
    pub(crate) dom_id: Option<String>,
    pub(crate) href: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) disabled: bool,
    pub(crate) tab_index: Option<i32>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Node arena. Removed subtrees stay in the arena with their root's parent
/// cleared, so stale ids resolve but report as disconnected.
#[derive(Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
    active: Option<NodeId>,
}

impl Tree {
    fn new() -> Self {
        let body = Node {
            tag: Tag::Body,
            dom_id: None,
            href: None,
            text: None,
            disabled: false,
            tab_index: None,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![body],
            active: None,
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::NodeNotFound(id))
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root() {
                return true;
            }
            current = self.node(node_id).and_then(|node| node.parent);
        }
        false
    }

    /// Inclusive ancestry check, the same relation as `Node.contains`.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.node(node_id).and_then(|node| node.parent);
        }
        false
    }

    /// Ancestors of `target` from the outermost down to `target` itself.
    fn path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.node(node_id).and_then(|node| node.parent);
        }
        path.reverse();
        path
    }

    fn mount(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        let Element {
            tag,
            id: dom_id,
            href,
            disabled,
            tab_index,
            text,
            children,
        } = element;
        self.nodes.push(Node {
            tag,
            dom_id,
            href,
            text,
            disabled,
            tab_index,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        for child in children {
            self.mount(id, child);
        }
        id
    }
}

struct Inner {
    tree: RefCell<Tree>,
    listeners: RefCell<Registry>,
    top_layer: RefCell<Vec<LayerId>>,
    next_layer: Cell<u64>,
}

/// A headless document: element tree, keyboard focus, listener registry and
/// event dispatch.
///
/// `Document` is a cheap handle; clones share the same tree. It is
/// single-threaded by construction. No internal borrow is held while a
/// listener runs, so listeners may freely focus, register, remove or edit
/// the tree.
#[derive(Clone)]
pub struct Document {
    inner: Rc<Inner>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.inner.tree.borrow().nodes.len())
            .field("active", &self.active_element())
            .field("listeners", &self.listener_count())
            .field("top_layer", &self.inner.top_layer.borrow())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                tree: RefCell::new(Tree::new()),
                listeners: RefCell::new(Registry::default()),
                top_layer: RefCell::new(Vec::new()),
                next_layer: Cell::new(0),
            }),
        }
    }

    /// Whether two handles refer to the same document.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    pub fn body(&self) -> NodeId {
        self.inner.tree.borrow().root()
    }

    /// Mount `element` and its children as the last child of `parent`.
    /// Returns the id of the subtree root.
    pub fn append(&self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        let mut tree = self.inner.tree.borrow_mut();
        if tree.node(parent).is_none() {
            return Err(DomError::NodeNotFound(parent));
        }
        if !tree.is_connected(parent) {
            return Err(DomError::Detached(parent));
        }
        let id = tree.mount(parent, element);
        log::trace!("[dom] mounted {} under {}", id, parent);
        Ok(id)
    }

    /// Detach `node` and its subtree. Focus inside the subtree falls back
    /// to the body.
    pub fn remove(&self, node: NodeId) -> Result<(), DomError> {
        let mut tree = self.inner.tree.borrow_mut();
        if node == tree.root() {
            return Err(DomError::RootRemoval);
        }
        let parent = tree
            .node(node)
            .ok_or(DomError::NodeNotFound(node))?
            .parent
            .ok_or(DomError::Detached(node))?;
        if !tree.is_connected(node) {
            return Err(DomError::Detached(node));
        }

        if tree.active.is_some_and(|active| tree.contains(node, active)) {
            log::debug!("[dom] removing {} blurs the active element", node);
            tree.active = None;
        }
        tree.node_mut(parent)?.children.retain(|&child| child != node);
        tree.node_mut(node)?.parent = None;
        log::trace!("[dom] removed {} from {}", node, parent);
        Ok(())
    }

    /// Find a connected node by its `id` attribute.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.inner.tree.borrow();
        tree.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
            .find(|(node_id, node)| node.dom_id.as_deref() == Some(id) && tree.is_connected(*node_id))
            .map(|(node_id, _)| node_id)
    }

    pub fn tag(&self, node: NodeId) -> Option<Tag> {
        self.inner.tree.borrow().node(node).map(|n| n.tag.clone())
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.inner.tree.borrow().node(node).and_then(|n| n.text.clone())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.tree.borrow().node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .tree
            .borrow()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.inner.tree.borrow().is_connected(node)
    }

    /// True when `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.inner.tree.borrow().contains(ancestor, node)
    }

    /// Toggle `disabled`. Disabling the focused element blurs it.
    pub fn set_disabled(&self, node: NodeId, disabled: bool) -> Result<(), DomError> {
        let mut tree = self.inner.tree.borrow_mut();
        tree.node_mut(node)?.disabled = disabled;
        if tree.active == Some(node) && tree.node(node).is_some_and(|n| !focus::can_focus(n)) {
            tree.active = None;
        }
        Ok(())
    }

    pub fn set_tab_index(&self, node: NodeId, tab_index: Option<i32>) -> Result<(), DomError> {
        let mut tree = self.inner.tree.borrow_mut();
        tree.node_mut(node)?.tab_index = tab_index;
        if tree.active == Some(node) && tree.node(node).is_some_and(|n| !focus::can_focus(n)) {
            tree.active = None;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// The focused element, or `None` when focus rests on the body.
    pub fn active_element(&self) -> Option<NodeId> {
        self.inner.tree.borrow().active
    }

    /// Move keyboard focus to `node`.
    /// Returns true if focus changed. Nodes that are disconnected or cannot
    /// take focus are ignored.
    pub fn focus(&self, node: NodeId) -> bool {
        let mut tree = self.inner.tree.borrow_mut();
        let focusable = tree.node(node).is_some_and(focus::can_focus) && tree.is_connected(node);
        if !focusable {
            log::trace!("[focus] ignoring focus() on {}", node);
            return false;
        }
        if tree.active == Some(node) {
            return false;
        }
        log::debug!("[focus] {:?} -> {}", tree.active, node);
        tree.active = Some(node);
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&self) -> bool {
        let mut tree = self.inner.tree.borrow_mut();
        match tree.active.take() {
            Some(old) => {
                log::debug!("[focus] blurred {}", old);
                true
            }
            None => false,
        }
    }

    /// Tabbable descendants of `container` in tree order.
    pub fn focusable_within(&self, container: NodeId) -> Vec<NodeId> {
        focus::collect_focusable(&self.inner.tree.borrow(), container)
    }

    /// Whether `node` takes part in Tab navigation.
    pub fn is_tabbable(&self, node: NodeId) -> bool {
        self.inner.tree.borrow().node(node).is_some_and(focus::is_tabbable)
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn add_key_listener(
        &self,
        target: ListenerTarget,
        phase: ListenerPhase,
        callback: impl Fn(&mut KeyboardEvent) + 'static,
    ) -> ListenerId {
        let id = self
            .inner
            .listeners
            .borrow_mut()
            .add(target, phase, Callback::Key(Rc::new(callback)));
        log::trace!("[listener] added key {} on {:?} ({:?})", id, target, phase);
        id
    }

    pub fn add_click_listener(
        &self,
        target: ListenerTarget,
        phase: ListenerPhase,
        callback: impl Fn(&mut MouseEvent) + 'static,
    ) -> ListenerId {
        let id = self
            .inner
            .listeners
            .borrow_mut()
            .add(target, phase, Callback::Click(Rc::new(callback)));
        log::trace!("[listener] added click {} on {:?} ({:?})", id, target, phase);
        id
    }

    /// Like [`add_key_listener`](Self::add_key_listener), but the
    /// registration lives exactly as long as the returned guard.
    pub fn listen_key(
        &self,
        target: ListenerTarget,
        phase: ListenerPhase,
        callback: impl Fn(&mut KeyboardEvent) + 'static,
    ) -> ListenerGuard {
        ListenerGuard::new(self.clone(), self.add_key_listener(target, phase, callback))
    }

    /// Like [`add_click_listener`](Self::add_click_listener), but the
    /// registration lives exactly as long as the returned guard.
    pub fn listen_click(
        &self,
        target: ListenerTarget,
        phase: ListenerPhase,
        callback: impl Fn(&mut MouseEvent) + 'static,
    ) -> ListenerGuard {
        ListenerGuard::new(self.clone(), self.add_click_listener(target, phase, callback))
    }

    /// Returns true if the listener was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.inner.listeners.borrow_mut().remove(id);
        if removed {
            log::trace!("[listener] removed {}", id);
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Deliver a keydown to the active element (or the body) and run the
    /// default action if no listener prevented it.
    ///
    /// The only default action modelled is native Tab navigation. The
    /// dispatched event is returned so callers can inspect it.
    pub fn key_down(&self, mut event: KeyboardEvent) -> KeyboardEvent {
        let target = self.active_element().unwrap_or_else(|| self.body());
        event.target = self.active_element();
        self.dispatch(&mut event, target);

        if event.is_tab() && !event.default_prevented() {
            self.navigate_sequential(event.modifiers.shift);
        }
        event
    }

    /// Activate `node` with a pointer: focus moves first, the way a
    /// mousedown would, then a click is dispatched.
    ///
    /// Focus goes to the nearest focusable inclusive ancestor of `node`;
    /// if there is none the active element is blurred.
    pub fn click(&self, node: NodeId, button: MouseButton) -> Result<MouseEvent, DomError> {
        let focus_target = {
            let tree = self.inner.tree.borrow();
            if tree.node(node).is_none() {
                return Err(DomError::NodeNotFound(node));
            }
            tree.path(node)
                .into_iter()
                .rev()
                .find(|&id| tree.node(id).is_some_and(focus::can_focus))
        };
        match focus_target {
            Some(target) => {
                self.focus(target);
            }
            None => {
                self.blur();
            }
        }

        let mut event = MouseEvent::new(node, button);
        self.dispatch(&mut event, node);
        Ok(event)
    }

    fn navigate_sequential(&self, backward: bool) {
        let next = {
            let tree = self.inner.tree.borrow();
            focus::sequential_target(&tree, tree.active, backward)
        };
        match next {
            Some(node) => {
                self.focus(node);
            }
            None => {
                self.blur();
            }
        }
    }

    /// Route `event` along document capture, node capture (outermost
    /// first), target, node bubble (innermost first), document bubble.
    fn dispatch<E: Dispatch>(&self, event: &mut E, target: NodeId) {
        let (path, connected) = {
            let tree = self.inner.tree.borrow();
            (tree.path(target), tree.is_connected(target))
        };

        let mut stages: Vec<(ListenerTarget, EventPhase)> = Vec::with_capacity(path.len() * 2 + 2);
        if connected {
            stages.push((ListenerTarget::Document, EventPhase::Capture));
        }
        for &node in &path[..path.len() - 1] {
            stages.push((ListenerTarget::Node(node), EventPhase::Capture));
        }
        stages.push((ListenerTarget::Node(target), EventPhase::AtTarget));
        for &node in path[..path.len() - 1].iter().rev() {
            stages.push((ListenerTarget::Node(node), EventPhase::Bubble));
        }
        if connected {
            stages.push((ListenerTarget::Document, EventPhase::Bubble));
        }

        for (current, phase) in stages {
            if event.state().propagation_stopped {
                break;
            }
            let listeners = {
                let registry = self.inner.listeners.borrow();
                match phase {
                    EventPhase::Capture => registry.matching::<E>(current, ListenerPhase::Capture),
                    EventPhase::Bubble => registry.matching::<E>(current, ListenerPhase::Bubble),
                    EventPhase::AtTarget => {
                        let mut all = registry.matching::<E>(current, ListenerPhase::Capture);
                        all.extend(registry.matching::<E>(current, ListenerPhase::Bubble));
                        all
                    }
                    EventPhase::None => Vec::new(),
                }
            };
            if listeners.is_empty() {
                continue;
            }

            {
                let state = event.state();
                state.phase = phase;
                state.current_target = Some(current);
            }
            for (id, callback) in listeners {
                // Removed by an earlier listener in this same dispatch.
                if !self.inner.listeners.borrow().contains(id) {
                    continue;
                }
                callback(event);
            }
        }

        let state = event.state();
        state.phase = EventPhase::None;
        state.current_target = None;
    }

    // ------------------------------------------------------------------
    // Top layer
    // ------------------------------------------------------------------

    /// Allocate a layer id. Ids are never reused within a document.
    pub fn new_layer(&self) -> LayerId {
        let id = self.inner.next_layer.get();
        self.inner.next_layer.set(id + 1);
        LayerId(id)
    }

    /// Push `layer` to the top, moving it there if already present.
    pub fn enter_top_layer(&self, layer: LayerId) {
        let mut stack = self.inner.top_layer.borrow_mut();
        stack.retain(|&entry| entry != layer);
        stack.push(layer);
        log::trace!("[dom] top layer {:?}", stack);
    }

    /// Remove `layer` wherever it is in the stack.
    /// Returns true if it was present.
    pub fn leave_top_layer(&self, layer: LayerId) -> bool {
        let mut stack = self.inner.top_layer.borrow_mut();
        let before = stack.len();
        stack.retain(|&entry| entry != layer);
        log::trace!("[dom] top layer {:?}", stack);
        stack.len() != before
    }

    pub fn top_layer(&self) -> Option<LayerId> {
        self.inner.top_layer.borrow().last().copied()
    }
}
