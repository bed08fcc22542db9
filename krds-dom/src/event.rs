use crate::document::NodeId;
use crate::listener::ListenerTarget;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Where an event is in its propagation path when a listener sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    /// Not being dispatched.
    #[default]
    None,
    Capture,
    AtTarget,
    Bubble,
}

/// Dispatch bookkeeping shared by every event type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EventState {
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) phase: EventPhase,
    pub(crate) current_target: Option<ListenerTarget>,
}

/// A keydown, targeted at the active element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub(crate) target: Option<NodeId>,
    pub(crate) state: EventState,
}

impl KeyboardEvent {
    /// Build a keydown. `BackTab` is folded into `Tab` with Shift held so
    /// listeners only ever see one spelling of reverse navigation.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        let (key, modifiers) = match key {
            Key::BackTab => (
                Key::Tab,
                Modifiers {
                    shift: true,
                    ..modifiers
                },
            ),
            key => (key, modifiers),
        };
        Self {
            key,
            modifiers,
            target: None,
            state: EventState::default(),
        }
    }

    /// A keydown with no modifiers held.
    pub fn press(key: Key) -> Self {
        Self::new(key, Modifiers::new())
    }

    pub fn is_escape(&self) -> bool {
        self.key == Key::Escape
    }

    pub fn is_tab(&self) -> bool {
        self.key == Key::Tab
    }

    /// The focused element the key was delivered to, or `None` for the body.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn prevent_default(&mut self) {
        self.state.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.state.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.state.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.state.propagation_stopped
    }

    pub fn phase(&self) -> EventPhase {
        self.state.phase
    }

    pub fn current_target(&self) -> Option<ListenerTarget> {
        self.state.current_target
    }
}

/// A click on a specific node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub(crate) target: NodeId,
    pub(crate) state: EventState,
}

impl MouseEvent {
    pub fn new(target: NodeId, button: MouseButton) -> Self {
        Self {
            button,
            target,
            state: EventState::default(),
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn prevent_default(&mut self) {
        self.state.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.state.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.state.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.state.propagation_stopped
    }

    pub fn phase(&self) -> EventPhase {
        self.state.phase
    }

    pub fn current_target(&self) -> Option<ListenerTarget> {
        self.state.current_target
    }
}

// Conversion from crossterm types
impl Key {
    /// `None` for keys this layer does not model (media keys, lone
    /// modifiers, caps lock and the like).
    pub fn from_crossterm(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(key)
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

impl KeyboardEvent {
    /// Build a keydown from a terminal key event.
    ///
    /// Only `Press` events are keydowns; release and repeat events yield
    /// `None`, as do keys [`Key::from_crossterm`] does not model.
    pub fn from_crossterm(event: crossterm::event::KeyEvent) -> Option<Self> {
        if event.kind != crossterm::event::KeyEventKind::Press {
            return None;
        }
        let key = Key::from_crossterm(event.code)?;
        Some(Self::new(key, event.modifiers.into()))
    }
}
