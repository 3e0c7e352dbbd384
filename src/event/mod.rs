//! Event model.
//!
//! Three event variants exist: Action (an interactive component activated
//! itself), Focus (gained/lost) and Key (raw key + modifiers). Every component
//! keeps one listener list per variant; dispatch runs the listeners of the
//! matching variant in registration order.
//!
//! Events are never dispatched recursively up the tree. An unconsumed event is
//! re-enqueued for the next ancestor, one ancestor per queue turn (see
//! [`crate::window::Ui::enqueue_event`]).

pub mod queue;

use crate::component::ComponentId;
use crate::window::Ui;

pub use queue::{Lane, TaskQueue};

// =============================================================================
// Keys
// =============================================================================

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CONTROL = 1 << 2;
    }
}

/// Logical key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Null,
}

/// A raw key press: logical code, optional literal character, modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub ch: Option<char>,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key press without modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, Modifiers::NONE)
    }

    /// A key press with modifiers. Character keys carry their literal.
    pub fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        let ch = match code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        };
        Self { code, ch, modifiers }
    }

    /// Enter or Space: the keys that activate the focused component.
    pub fn is_activation(&self) -> bool {
        matches!(self.code, KeyCode::Enter | KeyCode::Char(' '))
    }

    /// The focus direction an arrow key maps to.
    pub fn direction(&self) -> Option<crate::types::Direction> {
        use crate::types::Direction;
        match self.code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Whether focus was gained or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusChange {
    Gained,
    Lost,
}

/// Variant payload of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Action,
    Focus(FocusChange),
    Key(KeyInput),
}

/// Tag of an event variant, used to index listener tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventVariant {
    Action,
    Focus,
    Key,
}

/// An event travelling through the tree.
#[derive(Debug, Clone)]
pub struct Event {
    source: ComponentId,
    current: ComponentId,
    consumed: bool,
    kind: EventKind,
}

impl Event {
    pub fn new(source: ComponentId, kind: EventKind) -> Self {
        Self {
            source,
            current: source,
            consumed: false,
            kind,
        }
    }

    pub fn action(source: ComponentId) -> Self {
        Self::new(source, EventKind::Action)
    }

    pub fn focus(source: ComponentId, change: FocusChange) -> Self {
        Self::new(source, EventKind::Focus(change))
    }

    pub fn key(source: ComponentId, key: KeyInput) -> Self {
        Self::new(source, EventKind::Key(key))
    }

    /// The component the event was raised for.
    pub fn source(&self) -> ComponentId {
        self.source
    }

    /// The component whose listeners are currently running.
    pub fn current(&self) -> ComponentId {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: ComponentId) {
        self.current = id;
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn variant(&self) -> EventVariant {
        match self.kind {
            EventKind::Action => EventVariant::Action,
            EventKind::Focus(_) => EventVariant::Focus,
            EventKind::Key(_) => EventVariant::Key,
        }
    }

    /// Key payload, if this is a key event.
    pub fn key_input(&self) -> Option<KeyInput> {
        match self.kind {
            EventKind::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Focus payload, if this is a focus event.
    pub fn focus_change(&self) -> Option<FocusChange> {
        match self.kind {
            EventKind::Focus(change) => Some(change),
            _ => None,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Stop bubbling after the current component's listeners have run.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Event callback. Runs on the pump with full access to the UI state.
pub type Listener = Box<dyn FnMut(&mut Ui, &mut Event) + Send>;

/// Handle returned on registration, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Per-variant listener lists of one component.
#[derive(Default)]
pub struct Listeners {
    action: Vec<(ListenerId, Listener)>,
    focus: Vec<(ListenerId, Listener)>,
    key: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_mut(&mut self, variant: EventVariant) -> &mut Vec<(ListenerId, Listener)> {
        match variant {
            EventVariant::Action => &mut self.action,
            EventVariant::Focus => &mut self.focus,
            EventVariant::Key => &mut self.key,
        }
    }

    /// Register a listener; it runs after every listener registered before it.
    pub fn add(&mut self, variant: EventVariant, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.list_mut(variant).push((id, listener));
        id
    }

    /// Remove a listener from whichever list holds it.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        for variant in [EventVariant::Action, EventVariant::Focus, EventVariant::Key] {
            let list = self.list_mut(variant);
            if let Some(pos) = list.iter().position(|(lid, _)| *lid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn len(&self, variant: EventVariant) -> usize {
        match variant {
            EventVariant::Action => self.action.len(),
            EventVariant::Focus => self.focus.len(),
            EventVariant::Key => self.key.len(),
        }
    }

    /// Take one list out for dispatch. Listeners registered while it is out
    /// land in the (now empty) slot and are merged back by [`Self::restore`].
    pub(crate) fn take(&mut self, variant: EventVariant) -> Vec<(ListenerId, Listener)> {
        std::mem::take(self.list_mut(variant))
    }

    pub(crate) fn restore(&mut self, variant: EventVariant, mut taken: Vec<(ListenerId, Listener)>) {
        let list = self.list_mut(variant);
        taken.append(list);
        *list = taken;
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("action", &self.action.len())
            .field("focus", &self.focus.len())
            .field("key", &self.key.len())
            .finish()
    }
}
