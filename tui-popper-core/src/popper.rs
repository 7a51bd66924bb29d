//! Lifecycle coordinator
//!
//! [`Popper`] owns everything one floating element needs: the trigger
//! binder, the visibility state machine, the timers and at most one live
//! [`PopperInstance`]. Hosts feed it lifecycle signals and interaction
//! events, render the floating element at [`Popper::coordinates`] and read
//! outbound notifications from [`Popper::drain_events`].
//!
//! ```ignore
//! let mut popper = Popper::new(config, ManualScheduler::new())?;
//! popper.anchor().attach(button_area);
//! popper.floating().attach(Rect::new(0, 0, 20, 3));
//! popper.mount();
//!
//! // in the event loop
//! popper.handle_mouse(&mouse);
//! popper.advance(elapsed);
//! for event in popper.drain_events() { /* ... */ }
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossterm::event::MouseEvent;
use ratatui::layout::Rect;
use tracing::{debug, trace, warn};

use crate::binder::{TriggerBinder, TriggerEvent};
use crate::config::PopperConfig;
use crate::error::ConfigError;
use crate::mask::Mask;
use crate::middleware::Middleware;
use crate::pointer::PointerTracker;
use crate::position::{
    CellPositioner, Coordinates, ElementRef, Placement, PopperInstance, PositionOptions,
    Positioner,
};
use crate::timers::{ManualScheduler, Scheduler, TimerFired};
use crate::trigger::TriggerConfig;
use crate::visibility::{reduce, Phase, VisibilityEffect, VisibilityPolicy, VisibilityState};
use crate::{Action, PopperAction};

static NEXT_POPPER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique popper identifier, displayed as `tui-popper-<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopperId(u64);

impl PopperId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_POPPER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PopperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tui-popper-{}", self.0)
    }
}

/// Notifications for the host component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopperEvent {
    /// Effective visibility changed
    VisibleChanged(bool),
    /// Controlled mode: the host should set its `visible` value
    UpdateVisible(bool),
    /// Enter transition finished
    AfterEnter,
    /// Leave transition finished
    AfterLeave,
}

/// One floating element bound to one anchor.
pub struct Popper<S: Scheduler> {
    id: PopperId,
    scope: &'static str,
    config: PopperConfig,
    policy: VisibilityPolicy,
    state: VisibilityState,
    binder: TriggerBinder,
    pointer: PointerTracker,
    mask: Mask,
    scheduler: S,
    positioner: Rc<dyn Positioner>,
    instance: Option<PopperInstance>,
    anchor: ElementRef,
    floating: ElementRef,
    boundary: ElementRef,
    mounted: bool,
    active: bool,
    events: Vec<PopperEvent>,
    middleware: Option<Box<dyn Middleware<PopperAction>>>,
}

impl<S: Scheduler> Popper<S> {
    /// Build a popper from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ManualWithoutVisible`] for manual mode without a bound
    /// `visible` value.
    pub fn new(config: PopperConfig, scheduler: S) -> Result<Self, ConfigError> {
        Self::with_scope("Popper", config, scheduler)
    }

    /// Like [`new`](Self::new), naming `scope` in configuration errors
    pub fn with_scope(
        scope: &'static str,
        config: PopperConfig,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        config.validate(scope)?;

        let popper = Self {
            id: PopperId::next(),
            scope,
            policy: config.policy(),
            state: VisibilityState::new(config.disabled, config.visible),
            binder: TriggerBinder::bind(&config.trigger),
            pointer: PointerTracker::new(),
            mask: Mask::new(config.mask),
            scheduler,
            positioner: Rc::new(CellPositioner),
            instance: None,
            anchor: ElementRef::new(),
            floating: ElementRef::new(),
            boundary: ElementRef::new(),
            mounted: false,
            active: false,
            events: Vec::new(),
            middleware: None,
            config,
        };
        debug!(popper = %popper.id, scope, trigger = ?popper.config.trigger, "Popper created");
        Ok(popper)
    }

    /// Replace the position computation
    pub fn with_positioner(mut self, positioner: impl Positioner + 'static) -> Self {
        self.positioner = Rc::new(positioner);
        self
    }

    /// Intercept every dispatched action
    pub fn with_middleware(mut self, middleware: impl Middleware<PopperAction> + 'static) -> Self {
        self.middleware = Some(Box::new(middleware));
        self
    }

    /// Share element handles with the host (e.g. a boundary owned by a parent)
    pub fn with_elements(
        mut self,
        anchor: ElementRef,
        floating: ElementRef,
        boundary: ElementRef,
    ) -> Self {
        self.anchor = anchor;
        self.floating = floating;
        self.boundary = boundary;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> PopperId {
        self.id
    }

    pub fn config(&self) -> &PopperConfig {
        &self.config
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Effective visibility
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn binder(&self) -> &TriggerBinder {
        &self.binder
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The anchor element handle; attach its laid-out area while rendering
    pub fn anchor(&self) -> &ElementRef {
        &self.anchor
    }

    /// The floating element handle; only its size is used for positioning
    pub fn floating(&self) -> &ElementRef {
        &self.floating
    }

    /// Area the floating element must stay inside
    pub fn boundary(&self) -> &ElementRef {
        &self.boundary
    }

    /// The live positioning instance, if any
    pub fn instance(&self) -> Option<&PopperInstance> {
        self.instance.as_ref()
    }

    pub fn has_instance(&self) -> bool {
        self.instance.is_some()
    }

    /// Live coordinates for rendering the floating element
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.instance.as_ref().and_then(PopperInstance::coordinates)
    }

    /// Screen area occupied by the floating element while visible
    pub fn floating_area(&self) -> Option<Rect> {
        self.coordinates()
            .filter(|_| self.state.is_visible())
            .map(|c| c.rect)
    }

    // =========================================================================
    // Events and actions
    // =========================================================================

    /// Run one action through the state machine and apply its effects.
    ///
    /// Returns whether anything changed.
    pub fn dispatch(&mut self, action: PopperAction) -> bool {
        if let PopperAction::TimerFired(timer) = action {
            if timer.popper != self.id {
                trace!(popper = %self.id, from = %timer.popper, "Timer for another popper ignored");
                return false;
            }
        }

        trace!(popper = %self.id, action = action.name(), "Dispatching");
        if let Some(middleware) = self.middleware.as_mut() {
            middleware.before(&action);
        }

        let was_visible = self.state.is_visible();
        let result = reduce(&mut self.state, &self.policy, action);
        let changed = result.changed;
        for effect in result.effects {
            self.apply(effect);
        }
        if self.state.is_visible() != was_visible {
            self.sync_positioning();
        }

        if let Some(middleware) = self.middleware.as_mut() {
            middleware.after(&action, changed);
        }
        changed
    }

    fn apply(&mut self, effect: VisibilityEffect) {
        match effect {
            VisibilityEffect::StartTimer { slot, id, delay } => {
                trace!(popper = %self.id, slot = slot.as_str(), ?delay, "Timer started");
                self.scheduler.schedule(
                    TimerFired {
                        popper: self.id,
                        slot,
                        id,
                    },
                    delay,
                );
            }
            VisibilityEffect::CancelTimer(slot) => self.scheduler.cancel(slot),
            VisibilityEffect::VisibleChanged(visible) => {
                debug!(popper = %self.id, visible, "Visibility changed");
                self.events.push(PopperEvent::VisibleChanged(visible));
            }
            VisibilityEffect::RequestVisible(visible) => {
                self.events.push(PopperEvent::UpdateVisible(visible));
            }
            VisibilityEffect::DestroyPositioning => self.destroy_instance(),
        }
    }

    /// Route an interaction event through the trigger binder
    pub fn handle(&mut self, event: TriggerEvent) -> bool {
        match self.binder.route(event) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Derive enter/leave/click and outside-click events from a mouse event
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let anchor = self.anchor.rect().filter(|_| self.anchor.is_attached());
        let floating = self.floating_area();

        let mut events = self.pointer.track(mouse, anchor, floating);
        if self.state.is_visible() {
            events.extend(self.mask.hit_test(mouse, anchor, floating));
        }

        let mut changed = false;
        for event in events {
            changed |= self.handle(event);
        }
        changed
    }

    /// Imperative show: no delay
    pub fn show(&mut self) -> bool {
        self.dispatch(PopperAction::Show)
    }

    /// Imperative hide: no delay, ignores the enterable exception flag
    pub fn hide(&mut self) -> bool {
        self.dispatch(PopperAction::Hide)
    }

    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        self.config.disabled = disabled;
        self.dispatch(PopperAction::SetDisabled(disabled))
    }

    /// Bind, change or unbind the externally controlled `visible` value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ManualWithoutVisible`] when unbinding in manual mode.
    pub fn set_visible_prop(&mut self, visible: Option<bool>) -> Result<bool, ConfigError> {
        if visible.is_none() && self.config.trigger.is_manual() {
            return Err(ConfigError::ManualWithoutVisible { scope: self.scope });
        }
        self.config.visible = visible;
        Ok(self.dispatch(PopperAction::SetVisibleProp(visible)))
    }

    /// Replace the trigger configuration, re-binding the listeners.
    pub fn rebind(&mut self, trigger: TriggerConfig) -> Result<(), ConfigError> {
        let config = self.config.clone().with_trigger(trigger);
        config.validate(self.scope)?;

        self.config = config;
        self.policy = self.config.policy();
        self.binder.rebind(&trigger);
        debug!(popper = %self.id, trigger = ?trigger, "Trigger rebound");
        Ok(())
    }

    /// Take full control of the positioning options and recompute
    pub fn set_position_options(&mut self, options: PositionOptions) {
        self.config.position_override = Some(options);
        self.apply_position_options();
    }

    /// Change the preferred placement and recompute
    pub fn set_placement(&mut self, placement: Placement) {
        self.config.placement = placement;
        self.apply_position_options();
    }

    fn apply_position_options(&mut self) {
        let options = self.config.position_options();
        if let Some(instance) = self.instance.as_mut() {
            if let Err(err) = instance.set_options(options) {
                warn!(popper = %self.id, error = %err, "Popper options not applied");
            }
        }
    }

    /// Drain pending notifications
    pub fn drain_events(&mut self) -> Vec<PopperEvent> {
        std::mem::take(&mut self.events)
    }

    /// Report the end of the enter or leave transition
    pub fn finish_transition(&mut self) {
        let event = if self.state.is_visible() {
            PopperEvent::AfterEnter
        } else {
            PopperEvent::AfterLeave
        };
        self.events.push(event);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// First render finished
    pub fn mount(&mut self) {
        self.mounted = true;
        self.active = true;
        self.initialize();
    }

    /// A re-render finished: recompute, creating the instance if needed
    pub fn updated(&mut self) {
        if !self.mounted || !self.active {
            return;
        }
        if self.instance.is_some() {
            self.update_instance();
        } else {
            self.initialize();
        }
    }

    pub fn unmount(&mut self) {
        self.cancel_timers();
        self.destroy(true);
        self.pointer.reset();
        self.binder.reset_hover();
        self.mounted = false;
        self.active = false;
    }

    /// Back from a cached/inactive state
    pub fn activate(&mut self) {
        self.active = true;
        self.initialize();
    }

    pub fn deactivate(&mut self) {
        self.cancel_timers();
        self.destroy(true);
        self.active = false;
    }

    /// Create the positioning instance, replacing any live one.
    ///
    /// Fails softly: a detached element is logged and leaves no instance.
    pub fn initialize(&mut self) {
        self.destroy_instance();
        match PopperInstance::create(
            &self.anchor,
            &self.floating,
            &self.boundary,
            self.config.position_options(),
            Rc::clone(&self.positioner),
        ) {
            Ok(instance) => self.instance = Some(instance),
            Err(err) => {
                warn!(popper = %self.id, error = %err, "Popper initialization skipped");
            }
        }
    }

    /// Tear down the positioning instance.
    ///
    /// Without `force` this is a no-op while the popper is visible. Returns
    /// whether teardown was allowed; calling it again is harmless.
    pub fn destroy(&mut self, force: bool) -> bool {
        if self.state.is_visible() && !force {
            debug!(popper = %self.id, "Destroy skipped while visible");
            return false;
        }
        self.destroy_instance();
        true
    }

    fn destroy_instance(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.destroy();
        }
    }

    fn update_instance(&mut self) {
        if let Some(instance) = self.instance.as_mut() {
            if let Err(err) = instance.update() {
                warn!(popper = %self.id, error = %err, "Popper update skipped");
            }
        }
    }

    fn sync_positioning(&mut self) {
        if !self.mounted || !self.active {
            return;
        }
        if self.instance.is_some() {
            self.update_instance();
        } else if self.state.is_visible() {
            self.initialize();
        }
    }

    fn cancel_timers(&mut self) {
        self.scheduler.cancel_all();
        self.state.forget_timers();
    }
}

impl Popper<ManualScheduler> {
    /// Move the virtual clock forward, firing due timers in order.
    ///
    /// Timers scheduled by a firing inside the window fire too.
    pub fn advance(&mut self, by: Duration) -> bool {
        let until = self.scheduler.now() + by;
        let mut changed = false;
        while let Some(timer) = self.scheduler.pop_due(until) {
            changed |= self.dispatch(PopperAction::TimerFired(timer));
        }
        self.scheduler.advance_to(until);
        changed
    }
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for Popper<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popper")
            .field("id", &self.id)
            .field("phase", &self.state.phase())
            .field("visible", &self.state.is_visible())
            .field("instance", &self.instance)
            .field("scheduler", &self.scheduler)
            .field("mounted", &self.mounted)
            .field("active", &self.active)
            .finish()
    }
}
