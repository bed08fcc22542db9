//! Keyboard and pointer interaction layer for KRDS components.
//!
//! The composables here are what dialogs, popovers and menus build on:
//! [`FocusTrap`] keeps Tab inside a container, [`EscapeKeyHandler`] reacts
//! to Escape, [`ClickOutside`] reacts to clicks that land elsewhere, and
//! [`Modal`] wires all three together. They run against the headless
//! [`krds_dom::Document`] and tie their listeners to a component [`Scope`].

pub mod click_outside;
pub mod config;
pub mod element_ref;
pub mod escape_key;
pub mod focus_trap;
pub mod lifecycle;
pub mod modal;
pub mod prelude;

pub use click_outside::ClickOutside;
pub use config::{FocusTrapConfig, InitialFocus, ModalConfig, Nesting};
pub use element_ref::ElementRef;
pub use escape_key::EscapeKeyHandler;
pub use focus_trap::FocusTrap;
pub use lifecycle::{LifecycleError, Scope, ScopeState};
pub use modal::{CloseReason, Modal};

pub use krds_dom as dom;
