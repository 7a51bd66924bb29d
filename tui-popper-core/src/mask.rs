//! Outside-click detection
//!
//! While a masked popper is visible, any mouse press that lands outside both
//! the anchor and the floating content closes it, regardless of the trigger
//! mode or the enterable exception flag.

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::binder::TriggerEvent;

/// Full-screen layer beneath the floating element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mask {
    enabled: bool,
}

impl Mask {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether `mouse` is a press outside both `anchor` and `floating`
    pub fn is_outside(
        &self,
        mouse: &MouseEvent,
        anchor: Option<Rect>,
        floating: Option<Rect>,
    ) -> bool {
        if !self.enabled || !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return false;
        }
        let position = Position::new(mouse.column, mouse.row);
        ![anchor, floating]
            .into_iter()
            .flatten()
            .any(|rect| rect.contains(position))
    }

    /// `OutsideClick` for an outside press, `None` otherwise
    pub fn hit_test(
        &self,
        mouse: &MouseEvent,
        anchor: Option<Rect>,
        floating: Option<Rect>,
    ) -> Option<TriggerEvent> {
        self.is_outside(mouse, anchor, floating)
            .then_some(TriggerEvent::OutsideClick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mouse_down, mouse_move, mouse_down_with};
    use crossterm::event::MouseButton;

    fn rects() -> (Option<Rect>, Option<Rect>) {
        (Some(Rect::new(10, 10, 6, 1)), Some(Rect::new(8, 11, 10, 3)))
    }

    #[test]
    fn test_press_outside_hits() {
        let (anchor, floating) = rects();
        let mask = Mask::new(true);
        assert_eq!(
            mask.hit_test(&mouse_down(0, 0), anchor, floating),
            Some(TriggerEvent::OutsideClick)
        );
        assert!(
            mask.is_outside(&mouse_down_with(MouseButton::Right, 40, 20), anchor, floating)
        );
    }

    #[test]
    fn test_press_inside_is_ignored() {
        let (anchor, floating) = rects();
        let mask = Mask::new(true);
        assert_eq!(mask.hit_test(&mouse_down(11, 10), anchor, floating), None);
        assert_eq!(mask.hit_test(&mouse_down(9, 13), anchor, floating), None);
    }

    #[test]
    fn test_moves_and_disabled_mask_never_hit() {
        let (anchor, floating) = rects();
        assert!(
            !Mask::new(true).is_outside(&mouse_move(0, 0), anchor, floating)
        );
        assert!(
            !Mask::new(false).is_outside(&mouse_down(0, 0), anchor, floating)
        );
    }
}
