//! Modal dialog behaviour.
//!
//! A modal traps focus inside its panel while open, closes on Escape and
//! closes when a click lands outside the panel. When modals stack, only the
//! one whose trap is on top reacts to Escape or outside clicks.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use krds_dom::Document;

use crate::config::ModalConfig;
use crate::{ClickOutside, ElementRef, EscapeKeyHandler, FocusTrap, Scope};

/// Why a modal closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    OutsideClick,
    Programmatic,
}

struct ModalInner {
    config: ModalConfig,
    trap: FocusTrap,
    escape: EscapeKeyHandler,
    outside: ClickOutside,
    open: Cell<bool>,
    on_close: Box<dyn Fn(CloseReason)>,
}

/// Focus trap, Escape-to-close and click-outside-to-close for one panel.
#[derive(Clone)]
pub struct Modal {
    inner: Rc<ModalInner>,
}

impl Modal {
    pub fn new(
        document: &Document,
        panel: ElementRef,
        on_close: impl Fn(CloseReason) + 'static,
    ) -> Self {
        Self::with_config(document, panel, ModalConfig::default(), on_close)
    }

    pub fn with_config(
        document: &Document,
        panel: ElementRef,
        config: ModalConfig,
        on_close: impl Fn(CloseReason) + 'static,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<ModalInner>| {
            let trap = FocusTrap::with_config(document, panel.clone(), config.trap.clone());

            let closer = weak.clone();
            let gate = weak.clone();
            let escape = EscapeKeyHandler::new(document, move || {
                if let Some(modal) = closer.upgrade() {
                    modal.close(CloseReason::Escape);
                }
            })
            .enabled(move || {
                gate.upgrade()
                    .is_some_and(|modal| modal.config.close_on_escape && modal.owns_input())
            })
            .exclusive();

            let closer = weak.clone();
            let gate = weak.clone();
            let outside = ClickOutside::new(document, panel, move |_| {
                if let Some(modal) = closer.upgrade() {
                    modal.close(CloseReason::OutsideClick);
                }
            })
            .enabled(move || {
                gate.upgrade()
                    .is_some_and(|modal| modal.config.close_on_outside_click && modal.owns_input())
            })
            .exclusive();

            ModalInner {
                config,
                trap,
                escape,
                outside,
                open: Cell::new(false),
                on_close: Box::new(on_close),
            }
        });
        Self { inner }
    }

    /// Attach Escape and outside-click handling on mount. Teardown closes
    /// the modal silently (no `on_close`) and releases every listener.
    pub fn bind(&self, scope: &Scope) {
        self.inner.escape.bind(scope);
        self.inner.outside.bind(scope);
        let inner = Rc::clone(&self.inner);
        scope.on_before_unmount(move || {
            inner.open.set(false);
            inner.trap.deactivate();
        });
    }

    /// Clicks inside `element` (typically the button that opened the modal)
    /// do not count as outside.
    pub fn ignore_clicks_on(&self, element: ElementRef) {
        self.inner.outside.add_ignore(element);
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    pub fn trap(&self) -> &FocusTrap {
        &self.inner.trap
    }

    /// Open and trap focus. No-op if already open.
    pub fn open(&self) {
        if self.inner.open.replace(true) {
            return;
        }
        log::debug!("[modal] opening {:?}", self.inner.trap.layer());
        self.inner.trap.activate();
    }

    /// Close, restore focus and notify `on_close`. No-op if already closed.
    pub fn close(&self, reason: CloseReason) {
        self.inner.close(reason);
    }
}

impl ModalInner {
    fn owns_input(&self) -> bool {
        self.open.get() && self.trap.is_topmost()
    }

    fn close(&self, reason: CloseReason) {
        if !self.open.replace(false) {
            return;
        }
        log::debug!("[modal] closing {:?} ({:?})", self.trap.layer(), reason);
        self.trap.deactivate();
        (self.on_close)(reason);
    }
}

impl fmt::Debug for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modal")
            .field("open", &self.is_open())
            .field("trap", &self.inner.trap)
            .finish()
    }
}
