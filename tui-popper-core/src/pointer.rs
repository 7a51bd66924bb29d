//! Pointer enter/leave derived from terminal mouse events
//!
//! Terminals only report positions. [`PointerTracker`] remembers whether the
//! pointer was over the anchor and the floating content and turns each mouse
//! event into the enter/leave/click [`TriggerEvent`]s a browser would fire.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::binder::TriggerEvent;

fn hit(rect: Option<Rect>, position: Position) -> bool {
    rect.is_some_and(|r| r.contains(position))
}

/// Hover state for one anchor/floating pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerTracker {
    over_anchor: bool,
    over_floating: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn over_anchor(&self) -> bool {
        self.over_anchor
    }

    pub fn over_floating(&self) -> bool {
        self.over_floating
    }

    /// Translate one mouse event.
    ///
    /// Enter/leave events on a single move come out as `FloatingEnter`,
    /// `MouseEnter`, `MouseLeave`, `FloatingLeave`: whichever element the
    /// pointer lands on reports its enter before the element it left reports
    /// the leave, so a move between anchor and content never hides.
    pub fn track(
        &mut self,
        mouse: &MouseEvent,
        anchor: Option<Rect>,
        floating: Option<Rect>,
    ) -> Vec<TriggerEvent> {
        let position = Position::new(mouse.column, mouse.row);
        let in_anchor = hit(anchor, position);
        let in_floating = hit(floating, position);

        let mut events = Vec::new();
        if in_floating && !self.over_floating {
            events.push(TriggerEvent::FloatingEnter);
        }
        if in_anchor && !self.over_anchor {
            events.push(TriggerEvent::MouseEnter);
        }
        if !in_anchor && self.over_anchor {
            events.push(TriggerEvent::MouseLeave);
        }
        if !in_floating && self.over_floating {
            events.push(TriggerEvent::FloatingLeave);
        }
        self.over_anchor = in_anchor;
        self.over_floating = in_floating;

        if in_anchor && matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            events.push(TriggerEvent::Click);
        }
        events
    }

    /// Forget the hover state, e.g. after the terminal lost the pointer
    pub fn reset(&mut self) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        if self.over_anchor {
            events.push(TriggerEvent::MouseLeave);
        }
        if self.over_floating {
            events.push(TriggerEvent::FloatingLeave);
        }
        *self = Self::default();
        events
    }
}
