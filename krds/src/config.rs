//! Configuration types for the interaction composables.

use crate::ElementRef;

/// Where focus goes when a trap activates.
#[derive(Debug, Clone, Default)]
pub enum InitialFocus {
    /// First element of the focusable set.
    #[default]
    First,
    /// Leave focus where it is.
    Keep,
    /// A specific element. Falls back to `First` when the ref is empty or
    /// does not point into the focusable set.
    Element(ElementRef),
}

/// How simultaneously active traps share the Tab key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Nesting {
    /// Only the most recently activated trap still active intercepts Tab.
    #[default]
    TopmostOnly,
    /// Every active trap inspects Tab, in listener registration order.
    Independent,
}

/// Per-trap configuration.
#[derive(Debug, Clone)]
pub struct FocusTrapConfig {
    pub initial_focus: InitialFocus,

    /// Return focus to the element focused before activation.
    pub restore_focus: bool,

    pub nesting: Nesting,
}

impl Default for FocusTrapConfig {
    fn default() -> Self {
        Self {
            initial_focus: InitialFocus::First,
            restore_focus: true,
            nesting: Nesting::TopmostOnly,
        }
    }
}

impl FocusTrapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_focus(mut self, initial_focus: InitialFocus) -> Self {
        self.initial_focus = initial_focus;
        self
    }

    pub fn restore_focus(mut self, restore: bool) -> Self {
        self.restore_focus = restore;
        self
    }

    pub fn nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }
}

/// Behaviour of a [`Modal`](crate::Modal).
#[derive(Debug, Clone)]
pub struct ModalConfig {
    pub close_on_escape: bool,
    pub close_on_outside_click: bool,
    pub trap: FocusTrapConfig,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_outside_click: true,
            trap: FocusTrapConfig::default(),
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    pub fn close_on_outside_click(mut self, close: bool) -> Self {
        self.close_on_outside_click = close;
        self
    }

    pub fn trap(mut self, trap: FocusTrapConfig) -> Self {
        self.trap = trap;
        self
    }
}
