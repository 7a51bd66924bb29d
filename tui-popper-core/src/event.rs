//! Host terminal events

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

/// Event categories a component can care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Keyboard events
    Key,
    /// Mouse move/click/drag events
    Mouse,
    /// Scroll wheel events
    Scroll,
    /// Terminal resize events
    Resize,
    /// Periodic tick driving timers and animations
    Tick,
}

/// The actual event payload
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event (anything but the wheel)
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick
    Tick,
}

impl EventKind {
    /// Get the event type for this event kind
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Key(_) => EventType::Key,
            EventKind::Mouse(_) => EventType::Mouse,
            EventKind::Scroll { .. } => EventType::Scroll,
            EventKind::Resize(_, _) => EventType::Resize,
            EventKind::Tick => EventType::Tick,
        }
    }

    /// The mouse payload, if this is a mouse event
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            EventKind::Mouse(mouse) => Some(mouse),
            _ => None,
        }
    }

    /// Whether this event invalidates every laid-out area
    pub fn is_layout_change(&self) -> bool {
        matches!(self, EventKind::Resize(_, _) | EventKind::Scroll { .. })
    }

    /// Check if this is a quit request (Esc, Ctrl+C, Ctrl+Q)
    pub fn is_quit(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                matches!(key.code, KeyCode::Esc)
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')))
            }
            _ => false,
        }
    }
}
