//! Trigger event binding
//!
//! [`TriggerBinder`] turns a [`TriggerConfig`] into a fixed listener set and
//! routes raw interaction events to [`PopperAction`]s:
//!
//! | Event | Listener | Action |
//! |---|---|---|
//! | click | `click` | `Toggle` |
//! | mouse enter / leave | `hover` | `RequestShow` / `RequestHide` |
//! | focus / blur | `focus` | `RequestShow` / `RequestHide` |
//!
//! Events without a bound listener route to `None`.

use bitflags::bitflags;

use crate::trigger::{TriggerConfig, TriggerMode};
use crate::PopperAction;

/// An interaction observed on the anchor, the floating content or the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// Primary click on the anchor
    Click,
    /// Pointer entered the anchor
    MouseEnter,
    /// Pointer left the anchor
    MouseLeave,
    /// Anchor gained focus
    Focus,
    /// Anchor lost focus
    Blur,
    /// Pointer entered the floating content
    FloatingEnter,
    /// Pointer left the floating content
    FloatingLeave,
    /// Interaction outside both anchor and floating content (mask)
    OutsideClick,
}

impl TriggerEvent {
    pub fn name(self) -> &'static str {
        match self {
            TriggerEvent::Click => "click",
            TriggerEvent::MouseEnter => "mouseenter",
            TriggerEvent::MouseLeave => "mouseleave",
            TriggerEvent::Focus => "focus",
            TriggerEvent::Blur => "blur",
            TriggerEvent::FloatingEnter => "floating-enter",
            TriggerEvent::FloatingLeave => "floating-leave",
            TriggerEvent::OutsideClick => "outside-click",
        }
    }
}

bitflags! {
    /// Anchor listeners attached for a trigger configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        const CLICK = 0b0_0001;
        const MOUSE_ENTER = 0b0_0010;
        const MOUSE_LEAVE = 0b0_0100;
        const FOCUS = 0b0_1000;
        const BLUR = 0b1_0000;
    }
}

impl Listeners {
    /// Listeners implied by a trigger configuration
    pub fn for_trigger(trigger: &TriggerConfig) -> Self {
        let mut listeners = Listeners::empty();
        if trigger.contains(TriggerMode::Hover) {
            listeners |= Listeners::MOUSE_ENTER | Listeners::MOUSE_LEAVE;
        }
        if trigger.contains(TriggerMode::Click) {
            listeners |= Listeners::CLICK;
        }
        if trigger.contains(TriggerMode::Focus) {
            listeners |= Listeners::FOCUS | Listeners::BLUR;
        }
        listeners
    }

    /// The listener that receives `event`, if it is an anchor event
    pub fn for_event(event: TriggerEvent) -> Option<Self> {
        match event {
            TriggerEvent::Click => Some(Listeners::CLICK),
            TriggerEvent::MouseEnter => Some(Listeners::MOUSE_ENTER),
            TriggerEvent::MouseLeave => Some(Listeners::MOUSE_LEAVE),
            TriggerEvent::Focus => Some(Listeners::FOCUS),
            TriggerEvent::Blur => Some(Listeners::BLUR),
            TriggerEvent::FloatingEnter
            | TriggerEvent::FloatingLeave
            | TriggerEvent::OutsideClick => None,
        }
    }
}

/// Routes interaction events for one popper.
///
/// A focus that arrives together with a click (focus-by-click) would show the
/// popper and the click would immediately toggle it closed again. When both
/// `focus` and `click` are bound, a focus arms a one-shot flag that swallows
/// the next click. Blur disarms it.
///
/// Leaving the floating content only requests a hide when the pointer is not
/// back over a hover-bound anchor.
#[derive(Debug, Clone)]
pub struct TriggerBinder {
    trigger: TriggerConfig,
    listeners: Listeners,
    focused_by_click: bool,
    over_anchor: bool,
}

impl TriggerBinder {
    /// Attach the listeners implied by `trigger`
    pub fn bind(trigger: &TriggerConfig) -> Self {
        let binder = Self {
            trigger: *trigger,
            listeners: Listeners::for_trigger(trigger),
            focused_by_click: false,
            over_anchor: false,
        };
        tracing::trace!(listeners = ?binder.listeners, "Trigger listeners bound");
        binder
    }

    /// Remove the current listeners and attach the ones for `trigger`
    pub fn rebind(&mut self, trigger: &TriggerConfig) {
        *self = Self::bind(trigger);
    }

    pub fn trigger(&self) -> &TriggerConfig {
        &self.trigger
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Whether an anchor listener for `event` is attached
    pub fn is_bound(&self, event: TriggerEvent) -> bool {
        Listeners::for_event(event).is_some_and(|l| self.listeners.contains(l))
    }

    /// Forget that the pointer is over the anchor
    pub fn reset_hover(&mut self) {
        self.over_anchor = false;
    }

    /// Whether the next click will be swallowed
    pub fn focused_by_click(&self) -> bool {
        self.focused_by_click
    }

    /// Route an event to the action it implies.
    pub fn route(&mut self, event: TriggerEvent) -> Option<PopperAction> {
        if Listeners::for_event(event).is_some() && !self.is_bound(event) {
            return None;
        }

        match event {
            TriggerEvent::Click => {
                if self.focused_by_click {
                    self.focused_by_click = false;
                    tracing::trace!("Click after focus swallowed");
                    return None;
                }
                Some(PopperAction::Toggle)
            }
            TriggerEvent::MouseEnter => {
                self.over_anchor = true;
                Some(PopperAction::RequestShow)
            }
            TriggerEvent::MouseLeave => {
                self.over_anchor = false;
                Some(PopperAction::RequestHide)
            }
            TriggerEvent::Focus => {
                self.focused_by_click = self.listeners.contains(Listeners::CLICK);
                Some(PopperAction::RequestShow)
            }
            TriggerEvent::Blur => {
                self.focused_by_click = false;
                Some(PopperAction::RequestHide)
            }
            TriggerEvent::FloatingEnter if self.trigger.is_manual() => None,
            TriggerEvent::FloatingEnter => Some(PopperAction::FloatingEnter),
            TriggerEvent::FloatingLeave if self.trigger.is_manual() => None,
            TriggerEvent::FloatingLeave => Some(PopperAction::FloatingLeave {
                request_hide: self.listeners.contains(Listeners::MOUSE_LEAVE)
                    && !self.over_anchor,
            }),
            TriggerEvent::OutsideClick => Some(PopperAction::Hide),
        }
    }
}
