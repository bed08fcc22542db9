//! Common imports for components using the interaction layer.

pub use crate::{
    ClickOutside, CloseReason, ElementRef, EscapeKeyHandler, FocusTrap, FocusTrapConfig,
    InitialFocus, Modal, ModalConfig, Nesting, Scope,
};
pub use krds_dom::{Document, Element, Key, KeyboardEvent, Modifiers, MouseButton, MouseEvent, NodeId};
