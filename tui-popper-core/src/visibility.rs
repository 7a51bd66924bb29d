//! Visibility state machine
//!
//! ```text
//!            requestShow (showAfter > 0)          timer
//!   HIDDEN ───────────────────────────▶ PENDING_SHOW ─────▶ SHOWN
//!     ▲  ╲         requestHide ◀───────────┘                 │  ▲
//!     │   ╲ requestShow (showAfter = 0) ────────────────────▶│  │ requestShow
//!     │                                                       ▼  │
//!     └──────────── timer / requestHide (closeDelay = 0) ── PENDING_HIDE
//! ```
//!
//! [`reduce`] is a pure transition function: it mutates [`VisibilityState`]
//! and describes timer and notification work as [`VisibilityEffect`]s.

use std::time::Duration;

use crate::effect::DispatchResult;
use crate::timers::{TimerFired, TimerId, TimerSlot};
use crate::PopperAction;

/// Observable phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Hidden,
    PendingShow,
    Shown,
    PendingHide,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Hidden => "hidden",
            Phase::PendingShow => "pending-show",
            Phase::Shown => "shown",
            Phase::PendingHide => "pending-hide",
        }
    }
}

/// Why the hide slot is occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HideReason {
    /// `close_delay` after a hide request; cancelled by a new show request
    CloseDelay,
    /// `hide_after` auto-dismiss; runs regardless of interaction
    AutoHide,
}

/// Timing and guard settings the transitions consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityPolicy {
    pub show_after: Duration,
    pub hide_after: Duration,
    pub close_delay: Duration,
    /// Pointer over the floating content keeps it open
    pub enterable: bool,
    /// Trigger requests are ignored entirely
    pub manual: bool,
}

/// Side effects requested by a transition, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEffect {
    /// Schedule a timer, replacing whatever occupies `slot`
    StartTimer {
        slot: TimerSlot,
        id: TimerId,
        delay: Duration,
    },
    /// Cancel the timer in a slot
    CancelTimer(TimerSlot),
    /// Effective visibility flipped
    VisibleChanged(bool),
    /// Controlled mode: ask the host to change its `visible` value
    RequestVisible(bool),
    /// Force-destroy the positioning instance
    DestroyPositioning,
}

/// State owned by one popper.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityState {
    shown: bool,
    show_timer: Option<TimerId>,
    hide_timer: Option<(TimerId, HideReason)>,
    exception: bool,
    disabled: bool,
    visible_prop: Option<bool>,
    last_timer: u64,
}

impl VisibilityState {
    /// Initial state; a bound `visible` value is mirrored right away
    pub fn new(disabled: bool, visible_prop: Option<bool>) -> Self {
        Self {
            shown: visible_prop.unwrap_or(false),
            disabled,
            visible_prop,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.shown, self.show_timer, self.hide_timer) {
            (false, Some(_), _) => Phase::PendingShow,
            (false, None, _) => Phase::Hidden,
            (true, _, Some((_, HideReason::CloseDelay))) => Phase::PendingHide,
            (true, _, _) => Phase::Shown,
        }
    }

    /// Internal shown flag, ignoring `disabled`
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Effective visibility: shown and not disabled
    pub fn is_visible(&self) -> bool {
        self.shown && !self.disabled
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Pointer is over the floating content
    pub fn exception_flag(&self) -> bool {
        self.exception
    }

    /// Externally controlled `visible` value, if bound
    pub fn visible_prop(&self) -> Option<bool> {
        self.visible_prop
    }

    pub fn is_controlled(&self) -> bool {
        self.visible_prop.is_some()
    }

    pub fn pending_show(&self) -> Option<TimerId> {
        self.show_timer
    }

    pub fn pending_hide(&self) -> Option<(TimerId, HideReason)> {
        self.hide_timer
    }

    /// Drop both timer slots after the scheduler cancelled everything
    pub(crate) fn forget_timers(&mut self) {
        self.show_timer = None;
        self.hide_timer = None;
    }

    fn next_timer(&mut self) -> TimerId {
        self.last_timer += 1;
        TimerId::from_raw(self.last_timer)
    }

    fn start_show_timer(&mut self, delay: Duration) -> VisibilityEffect {
        let id = self.next_timer();
        self.show_timer = Some(id);
        VisibilityEffect::StartTimer {
            slot: TimerSlot::Show,
            id,
            delay,
        }
    }

    fn start_hide_timer(&mut self, delay: Duration, reason: HideReason) -> VisibilityEffect {
        let id = self.next_timer();
        self.hide_timer = Some((id, reason));
        VisibilityEffect::StartTimer {
            slot: TimerSlot::Hide,
            id,
            delay,
        }
    }

    fn cancel_show_timer(&mut self, effects: &mut Vec<VisibilityEffect>) {
        if self.show_timer.take().is_some() {
            effects.push(VisibilityEffect::CancelTimer(TimerSlot::Show));
        }
    }

    fn cancel_hide_timer(&mut self, effects: &mut Vec<VisibilityEffect>) {
        if self.hide_timer.take().is_some() {
            effects.push(VisibilityEffect::CancelTimer(TimerSlot::Hide));
        }
    }

    /// Enter SHOWN and arm auto-hide
    fn enter_shown(&mut self, policy: &VisibilityPolicy, effects: &mut Vec<VisibilityEffect>) {
        self.cancel_show_timer(effects);
        self.shown = true;
        effects.push(VisibilityEffect::VisibleChanged(true));
        if !policy.hide_after.is_zero() {
            effects.push(self.start_hide_timer(policy.hide_after, HideReason::AutoHide));
        }
    }

    fn enter_hidden(&mut self, effects: &mut Vec<VisibilityEffect>) {
        self.cancel_show_timer(effects);
        self.cancel_hide_timer(effects);
        self.shown = false;
        effects.push(VisibilityEffect::VisibleChanged(false));
    }

    /// Leave PENDING_HIDE back to SHOWN, re-arming auto-hide
    fn resume_shown(&mut self, policy: &VisibilityPolicy, effects: &mut Vec<VisibilityEffect>) {
        self.cancel_hide_timer(effects);
        if !policy.hide_after.is_zero() {
            effects.push(self.start_hide_timer(policy.hide_after, HideReason::AutoHide));
        }
    }

    fn cancel_all(&mut self, effects: &mut Vec<VisibilityEffect>) {
        self.cancel_show_timer(effects);
        self.cancel_hide_timer(effects);
    }
}

fn finish(effects: Vec<VisibilityEffect>) -> DispatchResult<VisibilityEffect> {
    if effects.is_empty() {
        DispatchResult::unchanged()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

/// Apply one action.
///
/// `changed` is set whenever the phase, a flag or a timer slot moved.
pub fn reduce(
    state: &mut VisibilityState,
    policy: &VisibilityPolicy,
    action: PopperAction,
) -> DispatchResult<VisibilityEffect> {
    match action {
        PopperAction::RequestShow => request_show(state, policy, false),
        PopperAction::Show => request_show(state, policy, true),
        PopperAction::RequestHide => request_hide(state, policy, false),
        PopperAction::Hide => request_hide(state, policy, true),
        PopperAction::Toggle => {
            if state.shown {
                request_hide(state, policy, false)
            } else {
                request_show(state, policy, false)
            }
        }
        PopperAction::FloatingEnter => floating_enter(state, policy),
        PopperAction::FloatingLeave { request_hide: hide } => {
            let was_set = std::mem::replace(&mut state.exception, false);
            let result = if hide {
                request_hide(state, policy, false)
            } else {
                DispatchResult::unchanged()
            };
            if was_set {
                result.mark_changed()
            } else {
                result
            }
        }
        PopperAction::TimerFired(timer) => timer_fired(state, policy, timer),
        PopperAction::SetDisabled(disabled) => set_disabled(state, disabled),
        PopperAction::SetVisibleProp(prop) => set_visible_prop(state, prop),
    }
}

fn request_show(
    state: &mut VisibilityState,
    policy: &VisibilityPolicy,
    imperative: bool,
) -> DispatchResult<VisibilityEffect> {
    if state.disabled || (policy.manual && !imperative) {
        return DispatchResult::unchanged();
    }

    if state.is_controlled() {
        return if state.shown {
            DispatchResult::unchanged()
        } else {
            DispatchResult::effect(VisibilityEffect::RequestVisible(true))
        };
    }

    let mut effects = Vec::new();
    match state.phase() {
        Phase::Hidden | Phase::PendingShow if !imperative && !policy.show_after.is_zero() => {
            // Restarts a pending show: the new timer replaces the old slot
            effects.push(state.start_show_timer(policy.show_after));
        }
        Phase::Hidden | Phase::PendingShow => state.enter_shown(policy, &mut effects),
        Phase::PendingHide => state.resume_shown(policy, &mut effects),
        Phase::Shown => {}
    }
    finish(effects)
}

fn request_hide(
    state: &mut VisibilityState,
    policy: &VisibilityPolicy,
    imperative: bool,
) -> DispatchResult<VisibilityEffect> {
    if state.disabled || (policy.manual && !imperative) {
        return DispatchResult::unchanged();
    }
    // Moving from the anchor into enterable content
    if !imperative && policy.enterable && state.exception {
        return DispatchResult::unchanged();
    }

    if state.is_controlled() {
        return if state.shown {
            DispatchResult::effect(VisibilityEffect::RequestVisible(false))
        } else {
            DispatchResult::unchanged()
        };
    }

    let mut effects = Vec::new();
    match state.phase() {
        Phase::Hidden => {}
        Phase::PendingShow => state.cancel_show_timer(&mut effects),
        Phase::Shown | Phase::PendingHide if !imperative && !policy.close_delay.is_zero() => {
            effects.push(
                state.start_hide_timer(policy.close_delay, HideReason::CloseDelay),
            );
        }
        Phase::Shown | Phase::PendingHide => state.enter_hidden(&mut effects),
    }
    finish(effects)
}

fn floating_enter(
    state: &mut VisibilityState,
    policy: &VisibilityPolicy,
) -> DispatchResult<VisibilityEffect> {
    let was_set = std::mem::replace(&mut state.exception, true);
    let mut effects = Vec::new();
    if policy.enterable && state.phase() == Phase::PendingHide {
        state.resume_shown(policy, &mut effects);
    }
    let result = finish(effects);
    if was_set {
        result
    } else {
        result.mark_changed()
    }
}

fn timer_fired(
    state: &mut VisibilityState,
    policy: &VisibilityPolicy,
    timer: TimerFired,
) -> DispatchResult<VisibilityEffect> {
    let mut effects = Vec::new();
    match timer.slot {
        TimerSlot::Show if state.show_timer == Some(timer.id) => {
            state.show_timer = None;
            state.enter_shown(policy, &mut effects);
        }
        TimerSlot::Hide if state.hide_timer.is_some_and(|(id, _)| id == timer.id) => {
            state.hide_timer = None;
            state.enter_hidden(&mut effects);
        }
        _ => {
            tracing::trace!(slot = timer.slot.as_str(), id = timer.id.raw(), "Stale timer ignored");
        }
    }
    finish(effects)
}

fn set_disabled(state: &mut VisibilityState, disabled: bool) -> DispatchResult<VisibilityEffect> {
    if state.disabled == disabled {
        return DispatchResult::unchanged();
    }

    let was_visible = state.is_visible();
    state.disabled = disabled;
    let mut effects = Vec::new();

    if disabled {
        state.cancel_all(&mut effects);
        if !state.is_controlled() {
            state.shown = false;
        }
        if was_visible {
            effects.push(VisibilityEffect::VisibleChanged(false));
            effects.push(VisibilityEffect::DestroyPositioning);
        }
    } else if state.is_visible() {
        // A controlled `visible = true` becomes effective again
        effects.push(VisibilityEffect::VisibleChanged(true));
    }
    DispatchResult::changed_with_many(effects)
}

fn set_visible_prop(
    state: &mut VisibilityState,
    prop: Option<bool>,
) -> DispatchResult<VisibilityEffect> {
    if state.visible_prop == prop {
        return DispatchResult::unchanged();
    }
    state.visible_prop = prop;

    let Some(visible) = prop else {
        // Back to uncontrolled: keep the current shown value
        return DispatchResult::changed();
    };

    let was_visible = state.is_visible();
    let mut effects = Vec::new();
    state.cancel_all(&mut effects);
    state.shown = visible;
    if state.is_visible() != was_visible {
        effects.push(VisibilityEffect::VisibleChanged(state.is_visible()));
    }
    DispatchResult::changed_with_many(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PopperId;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn fired(slot: TimerSlot, id: TimerId) -> PopperAction {
        PopperAction::TimerFired(TimerFired {
            popper: PopperId::from_raw(1),
            slot,
            id,
        })
    }

    fn started(result: &DispatchResult<VisibilityEffect>, slot: TimerSlot) -> TimerId {
        result
            .effects
            .iter()
            .find_map(|e| match e {
                VisibilityEffect::StartTimer { slot: s, id, .. } if *s == slot => Some(*id),
                _ => None,
            })
            .expect("no timer started")
    }

    fn hover() -> VisibilityPolicy {
        VisibilityPolicy {
            enterable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_immediate_show_and_hide() {
        let mut state = VisibilityState::default();
        let policy = hover();

        let r = reduce(&mut state, &policy, PopperAction::RequestShow);
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(true)]);
        assert_eq!(state.phase(), Phase::Shown);

        let r = reduce(&mut state, &policy, PopperAction::RequestHide);
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(false)]);
        assert_eq!(state.phase(), Phase::Hidden);
    }

    #[test]
    fn test_show_after_then_hide_never_shows() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            show_after: ms(200),
            ..hover()
        };

        let r = reduce(&mut state, &policy, PopperAction::RequestShow);
        let id = started(&r, TimerSlot::Show);
        assert_eq!(state.phase(), Phase::PendingShow);

        let r = reduce(&mut state, &policy, PopperAction::RequestHide);
        assert_eq!(
            r.effects,
            vec![VisibilityEffect::CancelTimer(TimerSlot::Show)]
        );
        assert_eq!(state.phase(), Phase::Hidden);

        // A late delivery of the cancelled timer does nothing
        let r = reduce(&mut state, &policy, fired(TimerSlot::Show, id));
        assert!(!r.changed);
        assert!(!state.is_shown());
    }

    #[test]
    fn test_pending_show_timer_fires() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            show_after: ms(100),
            hide_after: ms(1000),
            ..hover()
        };

        let r = reduce(&mut state, &policy, PopperAction::RequestShow);
        let id = started(&r, TimerSlot::Show);

        let r = reduce(&mut state, &policy, fired(TimerSlot::Show, id));
        assert_eq!(r.effects[0], VisibilityEffect::VisibleChanged(true));
        let auto = started(&r, TimerSlot::Hide);
        assert_eq!(state.phase(), Phase::Shown);
        assert_eq!(state.pending_hide(), Some((auto, HideReason::AutoHide)));
    }

    #[test]
    fn test_repeated_show_request_restarts_timer() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            show_after: ms(100),
            ..hover()
        };

        let first = started(
            &reduce(&mut state, &policy, PopperAction::RequestShow),
            TimerSlot::Show,
        );
        let second = started(
            &reduce(&mut state, &policy, PopperAction::RequestShow),
            TimerSlot::Show,
        );
        assert_ne!(first, second);

        assert!(
            !reduce(&mut state, &policy, fired(TimerSlot::Show, first)).changed
        );
        assert!(
            reduce(&mut state, &policy, fired(TimerSlot::Show, second)).changed
        );
        assert!(state.is_shown());
    }

    #[test]
    fn test_close_delay_cancelled_by_show() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            close_delay: ms(300),
            ..hover()
        };

        reduce(&mut state, &policy, PopperAction::RequestShow);
        let r = reduce(&mut state, &policy, PopperAction::RequestHide);
        let id = started(&r, TimerSlot::Hide);
        assert_eq!(state.phase(), Phase::PendingHide);
        assert!(state.is_visible());

        let r = reduce(&mut state, &policy, PopperAction::RequestShow);
        assert_eq!(
            r.effects,
            vec![VisibilityEffect::CancelTimer(TimerSlot::Hide)]
        );
        assert_eq!(state.phase(), Phase::Shown);

        assert!(
            !reduce(&mut state, &policy, fired(TimerSlot::Hide, id)).changed
        );
        assert!(state.is_visible());
    }

    #[test]
    fn test_close_delay_elapses() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            close_delay: ms(300),
            ..hover()
        };

        reduce(&mut state, &policy, PopperAction::RequestShow);
        let id = started(
            &reduce(&mut state, &policy, PopperAction::RequestHide),
            TimerSlot::Hide,
        );
        let r = reduce(&mut state, &policy, fired(TimerSlot::Hide, id));
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(false)]);
        assert_eq!(state.phase(), Phase::Hidden);
    }

    #[test]
    fn test_exception_flag_suppresses_hide_when_enterable() {
        let mut state = VisibilityState::default();
        let policy = hover();

        reduce(&mut state, &policy, PopperAction::RequestShow);
        assert!(
            reduce(&mut state, &policy, PopperAction::FloatingEnter).changed
        );
        assert!(state.exception_flag());

        let r = reduce(&mut state, &policy, PopperAction::RequestHide);
        assert!(!r.changed);
        assert!(state.is_visible());

        let r = reduce(
            &mut state,
            &policy,
            PopperAction::FloatingLeave { request_hide: true },
        );
        assert!(r.effects.contains(&VisibilityEffect::VisibleChanged(false)));
        assert!(!state.exception_flag());
    }

    #[test]
    fn test_not_enterable_ignores_exception_flag() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy::default();

        reduce(&mut state, &policy, PopperAction::RequestShow);
        reduce(&mut state, &policy, PopperAction::FloatingEnter);
        reduce(&mut state, &policy, PopperAction::RequestHide);
        assert!(!state.is_shown());
    }

    #[test]
    fn test_floating_enter_cancels_close_delay() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            close_delay: ms(200),
            ..hover()
        };

        reduce(&mut state, &policy, PopperAction::RequestShow);
        reduce(&mut state, &policy, PopperAction::RequestHide);
        let r = reduce(&mut state, &policy, PopperAction::FloatingEnter);
        assert_eq!(
            r.effects,
            vec![VisibilityEffect::CancelTimer(TimerSlot::Hide)]
        );
        assert_eq!(state.phase(), Phase::Shown);
    }

    #[test]
    fn test_hide_overrides_exception_flag() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            close_delay: ms(200),
            ..hover()
        };

        reduce(&mut state, &policy, PopperAction::RequestShow);
        reduce(&mut state, &policy, PopperAction::FloatingEnter);
        let r = reduce(&mut state, &policy, PopperAction::Hide);
        // Imperative: no close delay either
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(false)]);
    }

    #[test]
    fn test_auto_hide_is_unconditional() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            hide_after: ms(500),
            ..hover()
        };

        let r = reduce(&mut state, &policy, PopperAction::RequestShow);
        let id = started(&r, TimerSlot::Hide);
        reduce(&mut state, &policy, PopperAction::FloatingEnter);
        // Further show requests keep the auto-hide running
        assert!(
            !reduce(&mut state, &policy, PopperAction::RequestShow).changed
        );
        assert_eq!(state.phase(), Phase::Shown);

        let r = reduce(&mut state, &policy, fired(TimerSlot::Hide, id));
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(false)]);
    }

    #[test]
    fn test_toggle() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy::default();

        reduce(&mut state, &policy, PopperAction::Toggle);
        assert!(state.is_visible());
        reduce(&mut state, &policy, PopperAction::Toggle);
        assert!(!state.is_visible());
    }

    #[test]
    fn test_disable_while_shown() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            hide_after: ms(500),
            ..hover()
        };

        reduce(&mut state, &policy, PopperAction::RequestShow);
        let r = reduce(&mut state, &policy, PopperAction::SetDisabled(true));
        assert_eq!(
            r.effects,
            vec![
                VisibilityEffect::CancelTimer(TimerSlot::Hide),
                VisibilityEffect::VisibleChanged(false),
                VisibilityEffect::DestroyPositioning,
            ]
        );
        assert_eq!(state.phase(), Phase::Hidden);

        assert!(
            !reduce(&mut state, &policy, PopperAction::RequestShow).changed
        );
        assert!(!reduce(&mut state, &policy, PopperAction::Show).changed);

        // Re-enabling does not bring it back
        let r = reduce(&mut state, &policy, PopperAction::SetDisabled(false));
        assert!(r.effects.is_empty());
        assert!(!state.is_visible());
    }

    #[test]
    fn test_disable_while_hidden_has_no_visible_effect() {
        let mut state = VisibilityState::default();
        let r = reduce(
            &mut state,
            &VisibilityPolicy::default(),
            PopperAction::SetDisabled(true),
        );
        assert!(r.changed);
        assert!(r.effects.is_empty());
    }

    #[test]
    fn test_controlled_requests_go_to_host() {
        let mut state = VisibilityState::new(false, Some(false));
        let policy = VisibilityPolicy {
            show_after: ms(200),
            close_delay: ms(200),
            ..hover()
        };

        let r = reduce(&mut state, &policy, PopperAction::RequestShow);
        assert_eq!(r.effects, vec![VisibilityEffect::RequestVisible(true)]);
        assert!(!state.is_shown());

        let r = reduce(&mut state, &policy, PopperAction::SetVisibleProp(Some(true)));
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(true)]);

        let r = reduce(&mut state, &policy, PopperAction::RequestHide);
        assert_eq!(r.effects, vec![VisibilityEffect::RequestVisible(false)]);
        assert!(state.pending_hide().is_none());
    }

    #[test]
    fn test_manual_ignores_trigger_requests() {
        let mut state = VisibilityState::new(false, Some(false));
        let policy = VisibilityPolicy {
            manual: true,
            ..hover()
        };

        assert!(
            !reduce(&mut state, &policy, PopperAction::RequestShow).changed
        );
        assert!(!reduce(&mut state, &policy, PopperAction::Toggle).changed);

        let r = reduce(&mut state, &policy, PopperAction::Show);
        assert_eq!(r.effects, vec![VisibilityEffect::RequestVisible(true)]);
    }

    #[test]
    fn test_binding_prop_cancels_timers() {
        let mut state = VisibilityState::default();
        let policy = VisibilityPolicy {
            show_after: ms(200),
            ..hover()
        };

        reduce(&mut state, &policy, PopperAction::RequestShow);
        let r = reduce(&mut state, &policy, PopperAction::SetVisibleProp(Some(true)));
        assert_eq!(
            r.effects,
            vec![
                VisibilityEffect::CancelTimer(TimerSlot::Show),
                VisibilityEffect::VisibleChanged(true),
            ]
        );
        assert_eq!(state.phase(), Phase::Shown);
    }

    #[test]
    fn test_disabled_controlled_value_returns_on_enable() {
        let mut state = VisibilityState::new(true, Some(true));
        assert!(!state.is_visible());

        let r = reduce(
            &mut state,
            &VisibilityPolicy::default(),
            PopperAction::SetDisabled(false),
        );
        assert_eq!(r.effects, vec![VisibilityEffect::VisibleChanged(true)]);
    }
}
