use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use krds_dom::{Document, ListenerGuard, ListenerPhase, ListenerTarget, MouseEvent};

use crate::{ElementRef, Scope};

type Predicate = Rc<dyn Fn() -> bool>;

struct OutsideInner {
    document: Document,
    element: ElementRef,
    callback: Box<dyn Fn(&MouseEvent)>,
    ignore: RefCell<Vec<ElementRef>>,
    enabled: RefCell<Predicate>,
    exclusive: Cell<bool>,
    listener: RefCell<Option<ListenerGuard>>,
}

/// Calls back when a click lands outside an element's subtree.
///
/// Listens on the document in the capture phase, so it runs before any
/// handler inside the page and cannot be silenced by `stop_propagation`
/// during bubbling. Clicks are ignored while the element ref is empty.
#[derive(Clone)]
pub struct ClickOutside {
    inner: Rc<OutsideInner>,
}

impl ClickOutside {
    pub fn new(
        document: &Document,
        element: ElementRef,
        callback: impl Fn(&MouseEvent) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(OutsideInner {
                document: document.clone(),
                element,
                callback: Box::new(callback),
                ignore: RefCell::new(Vec::new()),
                enabled: RefCell::new(Rc::new(|| true)),
                exclusive: Cell::new(false),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Treat clicks inside `element` as inside too.
    pub fn ignore(self, element: ElementRef) -> Self {
        self.add_ignore(element);
        self
    }

    pub fn add_ignore(&self, element: ElementRef) {
        self.inner.ignore.borrow_mut().push(element);
    }

    /// Only react while `enabled` returns true. Defaults to always.
    pub fn enabled(self, enabled: impl Fn() -> bool + 'static) -> Self {
        *self.inner.enabled.borrow_mut() = Rc::new(enabled);
        self
    }

    /// Consume the click: skip clicks an earlier exclusive detector already
    /// handled, and mark handled ones with `prevent_default`. Stacked
    /// dismissable layers use this so one click dismisses one layer.
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

    /// Register the document capture listener. Idempotent.
    pub fn attach(&self) {
        if self.is_attached() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let guard = self.inner.document.listen_click(
            ListenerTarget::Document,
            ListenerPhase::Capture,
            move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle(event);
                }
            },
        );
        log::trace!("[click_outside] attached {}", guard.id());
        *self.inner.listener.borrow_mut() = Some(guard);
    }

    /// Remove the document listener. Idempotent.
    pub fn detach(&self) {
        let guard = self.inner.listener.borrow_mut().take();
        if let Some(guard) = guard {
            log::trace!("[click_outside] detached {}", guard.id());
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.listener.borrow().is_some()
    }

    pub fn element(&self) -> &ElementRef {
        &self.inner.element
    }
}

impl OutsideInner {
    fn handle(&self, event: &mut MouseEvent) {
        let Some(element) = self.element.get() else {
            return;
        };
        let target = event.target();
        if self.document.contains(element, target) {
            return;
        }
        let ignored = self
            .ignore
            .borrow()
            .iter()
            .filter_map(ElementRef::get)
            .any(|node| self.document.contains(node, target));
        if ignored {
            log::trace!("[click_outside] click on ignored element {}", target);
            return;
        }
        let exclusive = self.exclusive.get();
        if exclusive && event.default_prevented() {
            log::trace!("[click_outside] click on {} already handled", target);
            return;
        }
        let enabled = Rc::clone(&self.enabled.borrow());
        if !enabled() {
            return;
        }
        log::debug!("[click_outside] click on {} is outside {}", target, element);
        (self.callback)(event);
        if exclusive {
            event.prevent_default();
        }
    }
}

impl fmt::Debug for ClickOutside {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickOutside")
            .field("element", &self.inner.element)
            .field("attached", &self.is_attached())
            .field("exclusive", &self.inner.exclusive.get())
            .finish()
    }
}
