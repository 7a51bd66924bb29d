//! Test utilities for tui-popper hosts
//!
//! - Key and mouse event builders ([`char_key`], [`mouse_move`], [`mouse_down`])
//! - [`TestHarness`]: action channel plus state under test
//! - [`RenderHarness`]: renders into a `TestBackend` and returns plain text
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use tui_popper::testing::{mouse_move, TestHarness};
//!
//! let mut harness = TestHarness::<(), PopperAction>::new(());
//! let mut timers = TimerManager::new(harness.sender());
//! timers.schedule_after(TaskKey::new("popper:show"), Duration::ZERO, || PopperAction::Show);
//! assert_emitted!(harness.drain_emitted(), PopperAction::Show);
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::Action;

// ============================================================================
// Event builders
// ============================================================================

/// Create a `KeyEvent` for a key code with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with no modifiers.
///
/// ```
/// use tui_popper_core::testing::char_key;
/// use crossterm::event::KeyCode;
///
/// let k = char_key('x');
/// assert_eq!(k.code, KeyCode::Char('x'));
/// ```
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        modifiers: KeyModifiers::CONTROL,
        ..char_key(c)
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Pointer moved to `(column, row)` with no button held.
pub fn mouse_move(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Moved, column, row)
}

/// Left button pressed at `(column, row)`.
pub fn mouse_down(column: u16, row: u16) -> MouseEvent {
    mouse_down_with(MouseButton::Left, column, row)
}

/// `button` pressed at `(column, row)`.
pub fn mouse_down_with(button: MouseButton, column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(button), column, row)
}

/// Left button released at `(column, row)`.
pub fn mouse_up(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

/// Wrap a mouse event for `Component::handle_event`.
pub fn mouse_event(mouse: MouseEvent) -> EventKind {
    EventKind::Mouse(mouse)
}

// ============================================================================
// TestHarness
// ============================================================================

/// Generic test harness with an action channel.
///
/// Pass [`TestHarness::sender`] to anything that emits actions (a
/// `TimerManager`, a spawned task), then drain and assert.
pub struct TestHarness<S, A: Action> {
    /// The state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Wait for the next emitted action.
    pub async fn next_emitted(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Check if any actions were emitted.
    pub fn has_emitted(&mut self) -> bool {
        !self.drain_emitted().is_empty()
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

// ============================================================================
// RenderHarness
// ============================================================================

/// Renders into an in-memory terminal.
///
/// Panics on backend failures, which cannot happen with `TestBackend`.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|err| panic!("test terminal: {err}"));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|err| panic!("test draw: {err}"));
        self.terminal.backend().buffer().clone()
    }

    /// Draw one frame and return its symbols, one line per row.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(&self.render(draw))
    }
}

/// Buffer symbols without styling, rows joined with `\n`.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        if y > area.top() {
            out.push('\n');
        }
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
    }
    out
}

// ============================================================================
// Time control
// ============================================================================

/// Freeze the tokio clock so timer-driven visibility is deterministic.
#[cfg(feature = "testing-time")]
pub fn pause_time() {
    tokio::time::pause();
}

/// Resume the tokio clock.
#[cfg(feature = "testing-time")]
pub fn resume_time() {
    tokio::time::resume();
}

/// Move the paused clock forward, firing any timers that come due.
#[cfg(feature = "testing-time")]
pub async fn advance_time(by: std::time::Duration) {
    tokio::time::advance(by).await;
}

// ============================================================================
// Assertion macros
// ============================================================================

/// Assert that a specific action was emitted.
///
/// ```ignore
/// let events = popper.drain_events();
/// assert_emitted!(events, PopperEvent::VisibleChanged(true));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PopperAction;
    use ratatui::text::Line;

    #[test]
    fn test_mouse_builders() {
        let down = mouse_down(4, 2);
        assert_eq!(down.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((down.column, down.row), (4, 2));
        assert_eq!(mouse_move(1, 1).kind, MouseEventKind::Moved);
        assert_eq!(mouse_up(0, 0).kind, MouseEventKind::Up(MouseButton::Left));
    }

    #[test]
    fn test_harness_drains_in_order() {
        let mut harness = TestHarness::<(), PopperAction>::default();
        harness.emit(PopperAction::Show);
        harness.emit(PopperAction::Hide);

        let actions = harness.drain_emitted();
        assert_eq!(actions, vec![PopperAction::Show, PopperAction::Hide]);
        assert!(!harness.has_emitted());
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![PopperAction::Toggle, PopperAction::SetDisabled(true)];
        assert_emitted!(actions, PopperAction::Toggle);
        assert_not_emitted!(actions, PopperAction::Show);
        assert_eq!(count_emitted!(actions, PopperAction::SetDisabled(_)), 1);
        assert!(
            find_emitted!(actions, PopperAction::SetDisabled(true)).is_some()
        );
    }

    #[test]
    fn test_render_harness_plain_text() {
        let mut render = RenderHarness::new(6, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Line::raw("hi"), frame.area());
        });
        assert_eq!(output, "hi    \n      ");
    }
}
