//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI component that renders based on props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates external state
/// 3. `render` is a function of props plus internal UI state
///
/// Floating components keep their [`Popper`](crate::Popper) as internal UI
/// state: `handle_event` feeds it mouse events and returns the visibility
/// notifications it produced, `render` records the laid-out anchor area and
/// draws the floating element when visible.
///
/// # Example
///
/// ```ignore
/// use tui_popper::{Component, EventKind, Frame, Rect, PopperEvent};
///
/// struct Hint {
///     popper: Popper<ManualScheduler>,
/// }
///
/// impl Component<PopperEvent> for Hint {
///     type Props<'a> = &'a str;
///
///     fn handle_event(&mut self, event: &EventKind, _: Self::Props<'_>) -> impl IntoIterator<Item = PopperEvent> {
///         if let Some(mouse) = event.mouse() {
///             self.popper.handle_mouse(mouse);
///         }
///         self.popper.drain_events()
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, content: Self::Props<'_>) {
///         self.popper.anchor().set(Some(area));
///         // draw `content` at self.popper.floating_area()
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `[a, b]` or `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
