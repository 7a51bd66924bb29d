//! Action trait and the actions understood by the visibility state machine

use std::fmt::Debug;

use crate::timers::TimerFired;

/// Marker trait for actions that can be dispatched to a popper
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: Timer tasks send them back across threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Everything that can move a popper between hidden and shown.
///
/// Trigger-originated actions (`RequestShow`, `RequestHide`, `Toggle`) go
/// through the timer and guard policy. `Show` and `Hide` are the imperative
/// counterparts: no delays, and `Hide` ignores the enterable exception flag,
/// which is what an outside click on the mask needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopperAction {
    /// Pointer entered the anchor, or the anchor gained focus
    RequestShow,
    /// Pointer left the anchor, or the anchor lost focus
    RequestHide,
    /// Click on the anchor
    Toggle,
    /// Imperative show
    Show,
    /// Imperative hide; also raised by an outside click on the mask
    Hide,
    /// Pointer entered the floating content
    FloatingEnter,
    /// Pointer left the floating content
    FloatingLeave {
        /// Whether leaving the content should also request a hide
        request_hide: bool,
    },
    /// A scheduled show or hide timer elapsed
    TimerFired(TimerFired),
    /// The `disabled` flag changed
    SetDisabled(bool),
    /// The host bound (or unbound) an externally controlled visibility value
    SetVisibleProp(Option<bool>),
}

impl Action for PopperAction {
    fn name(&self) -> &'static str {
        match self {
            PopperAction::RequestShow => "RequestShow",
            PopperAction::RequestHide => "RequestHide",
            PopperAction::Toggle => "Toggle",
            PopperAction::Show => "Show",
            PopperAction::Hide => "Hide",
            PopperAction::FloatingEnter => "FloatingEnter",
            PopperAction::FloatingLeave { .. } => "FloatingLeave",
            PopperAction::TimerFired(_) => "TimerFired",
            PopperAction::SetDisabled(_) => "SetDisabled",
            PopperAction::SetVisibleProp(_) => "SetVisibleProp",
        }
    }
}

impl From<TimerFired> for PopperAction {
    fn from(timer: TimerFired) -> Self {
        PopperAction::TimerFired(timer)
    }
}
