//! Focus trap: confine Tab navigation to a container.
//!
//! While active, a trap watches document keydowns. A Tab on the last
//! focusable element wraps to the first, a Shift+Tab on the first wraps to
//! the last, and every other Tab is left to the document's native
//! traversal. The focusable set is recomputed on every Tab, so elements
//! added or disabled after activation are respected.
//!
//! Activating records the element that had focus; deactivating returns
//! focus to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use krds_dom::{
    Document, KeyboardEvent, LayerId, ListenerGuard, ListenerPhase, ListenerTarget, NodeId,
};

use crate::config::{FocusTrapConfig, InitialFocus, Nesting};
use crate::{ElementRef, Scope};

/// State for one activation. Dropping it stops Tab interception.
struct TrapSession {
    restore_to: Option<NodeId>,
    _listener: ListenerGuard,
}

struct TrapInner {
    document: Document,
    container: ElementRef,
    config: FocusTrapConfig,
    layer: LayerId,
    session: RefCell<Option<TrapSession>>,
}

/// Keeps keyboard focus inside a container while active.
///
/// `FocusTrap` is a cheap handle; clones control the same trap.
#[derive(Clone)]
pub struct FocusTrap {
    inner: Rc<TrapInner>,
}

impl FocusTrap {
    pub fn new(document: &Document, container: ElementRef) -> Self {
        Self::with_config(document, container, FocusTrapConfig::default())
    }

    pub fn with_config(document: &Document, container: ElementRef, config: FocusTrapConfig) -> Self {
        Self {
            inner: Rc::new(TrapInner {
                document: document.clone(),
                container,
                layer: document.new_layer(),
                config,
                session: RefCell::new(None),
            }),
        }
    }

    /// Force deactivation when `scope` tears down, whatever the trap's state.
    pub fn bind(&self, scope: &Scope) {
        let inner = Rc::clone(&self.inner);
        scope.on_before_unmount(move || inner.deactivate());
    }

    pub fn is_active(&self) -> bool {
        self.inner.session.borrow().is_some()
    }

    /// Active and on top of the document's trap stack.
    pub fn is_topmost(&self) -> bool {
        self.is_active() && self.inner.document.top_layer() == Some(self.inner.layer)
    }

    pub fn layer(&self) -> LayerId {
        self.inner.layer
    }

    pub fn container(&self) -> &ElementRef {
        &self.inner.container
    }

    pub fn config(&self) -> &FocusTrapConfig {
        &self.inner.config
    }

    /// Start trapping. No-op if already active.
    pub fn activate(&self) {
        let inner = &self.inner;
        if inner.session.borrow().is_some() {
            log::trace!("[focus_trap] {:?} already active", inner.layer);
            return;
        }

        let restore_to = inner.document.active_element();
        inner.document.enter_top_layer(inner.layer);

        let focusable = inner.focusable();
        if let Some(target) = inner.initial_target(&focusable) {
            inner.document.focus(target);
        }

        let weak = Rc::downgrade(&self.inner);
        let listener = inner.document.listen_key(
            ListenerTarget::Document,
            ListenerPhase::Bubble,
            move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_key(event);
                }
            },
        );
        *inner.session.borrow_mut() = Some(TrapSession {
            restore_to,
            _listener: listener,
        });

        log::debug!(
            "[focus_trap] activated {:?} with {} focusable, restore target {:?}",
            inner.layer,
            focusable.len(),
            restore_to
        );
    }

    /// Stop trapping and restore focus. No-op if not active.
    pub fn deactivate(&self) {
        self.inner.deactivate();
    }
}

impl TrapInner {
    fn focusable(&self) -> Vec<NodeId> {
        self.container
            .get()
            .map(|container| self.document.focusable_within(container))
            .unwrap_or_default()
    }

    fn initial_target(&self, focusable: &[NodeId]) -> Option<NodeId> {
        match &self.config.initial_focus {
            InitialFocus::Keep => None,
            InitialFocus::First => focusable.first().copied(),
            InitialFocus::Element(element) => element
                .get()
                .filter(|node| focusable.contains(node))
                .or_else(|| focusable.first().copied()),
        }
    }

    fn deactivate(&self) {
        let Some(session) = self.session.borrow_mut().take() else {
            return;
        };
        let TrapSession {
            restore_to,
            _listener: listener,
        } = session;
        drop(listener);
        self.document.leave_top_layer(self.layer);

        log::debug!("[focus_trap] deactivated {:?}", self.layer);
        if !self.config.restore_focus {
            return;
        }
        if let Some(node) = restore_to
            && !self.document.focus(node)
        {
            log::debug!("[focus_trap] restore target {} no longer focusable", node);
        }
    }

    fn handle_key(&self, event: &mut KeyboardEvent) {
        if !event.is_tab() || self.session.borrow().is_none() {
            return;
        }
        if self.config.nesting == Nesting::TopmostOnly
            && self.document.top_layer() != Some(self.layer)
        {
            log::trace!("[focus_trap] {:?} is not on top, ignoring Tab", self.layer);
            return;
        }

        let focusable = self.focusable();
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return;
        };
        let active = self.document.active_element();

        if event.modifiers.shift {
            if active == Some(first) {
                event.prevent_default();
                self.document.focus(last);
                log::debug!("[focus_trap] wrapped backward to {}", last);
            }
        } else if active == Some(last) {
            event.prevent_default();
            self.document.focus(first);
            log::debug!("[focus_trap] wrapped forward to {}", first);
        }
    }
}

impl Drop for TrapInner {
    fn drop(&mut self) {
        if self.session.get_mut().take().is_some() {
            self.document.leave_top_layer(self.layer);
        }
    }
}

impl fmt::Debug for FocusTrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusTrap")
            .field("layer", &self.inner.layer)
            .field("container", &self.inner.container)
            .field("active", &self.is_active())
            .finish()
    }
}
