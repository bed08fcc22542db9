use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use krds_dom::{Document, KeyboardEvent, ListenerGuard, ListenerPhase, ListenerTarget};

use crate::Scope;

type Predicate = Rc<dyn Fn() -> bool>;

struct EscapeInner {
    document: Document,
    callback: Box<dyn Fn()>,
    enabled: RefCell<Predicate>,
    exclusive: Cell<bool>,
    listener: RefCell<Option<ListenerGuard>>,
}

/// Calls back once per Escape keydown while an `enabled` predicate holds.
///
/// The predicate is evaluated on every keypress, so toggling whatever it
/// reads takes effect on the very next Escape without re-registering.
#[derive(Clone)]
pub struct EscapeKeyHandler {
    inner: Rc<EscapeInner>,
}

impl EscapeKeyHandler {
    pub fn new(document: &Document, callback: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(EscapeInner {
                document: document.clone(),
                callback: Box::new(callback),
                enabled: RefCell::new(Rc::new(|| true)),
                exclusive: Cell::new(false),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Only react while `enabled` returns true. Defaults to always.
    pub fn enabled(self, enabled: impl Fn() -> bool + 'static) -> Self {
        *self.inner.enabled.borrow_mut() = Rc::new(enabled);
        self
    }

    /// Skip Escapes another handler already consumed, and consume the ones
    /// this handler acts on (via `prevent_default`).
    pub fn exclusive(self) -> Self {
        self.inner.exclusive.set(true);
        self
    }

    /// Attach on mount, detach on teardown.
    pub fn bind(&self, scope: &Scope) {
        let on_mount = self.clone();
        scope.on_mounted(move || on_mount.attach());
        let on_unmount = self.clone();
        scope.on_before_unmount(move || on_unmount.detach());
    }

    /// Register the document listener. Idempotent.
    pub fn attach(&self) {
        if self.is_attached() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let guard = self.inner.document.listen_key(
            ListenerTarget::Document,
            ListenerPhase::Bubble,
            move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle(event);
                }
            },
        );
        log::trace!("[escape_key] attached {}", guard.id());
        *self.inner.listener.borrow_mut() = Some(guard);
    }

    /// Remove the document listener. Idempotent.
    pub fn detach(&self) {
        let guard = self.inner.listener.borrow_mut().take();
        if let Some(guard) = guard {
            log::trace!("[escape_key] detached {}", guard.id());
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.listener.borrow().is_some()
    }
}

impl EscapeInner {
    fn handle(&self, event: &mut KeyboardEvent) {
        if !event.is_escape() {
            return;
        }
        let exclusive = self.exclusive.get();
        if exclusive && event.default_prevented() {
            log::trace!("[escape_key] already handled");
            return;
        }
        let enabled = Rc::clone(&self.enabled.borrow());
        if !enabled() {
            log::trace!("[escape_key] disabled, ignoring");
            return;
        }
        (self.callback)();
        if exclusive {
            event.prevent_default();
        }
    }
}

impl fmt::Debug for EscapeKeyHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscapeKeyHandler")
            .field("attached", &self.is_attached())
            .field("exclusive", &self.inner.exclusive.get())
            .finish()
    }
}
