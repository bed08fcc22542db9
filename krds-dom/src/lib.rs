pub mod document;
pub mod element;
pub mod error;
pub mod event;
mod focus;
pub mod listener;

pub use document::{Document, LayerId, NodeId};
pub use element::{Element, Tag};
pub use error::DomError;
pub use event::{EventPhase, Key, KeyboardEvent, Modifiers, MouseButton, MouseEvent};
pub use listener::{ListenerGuard, ListenerId, ListenerPhase, ListenerTarget};
