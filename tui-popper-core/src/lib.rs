//! Core types for tui-popper
//!
//! This crate provides the machinery behind floating overlays (tooltips,
//! popovers, dropdowns) in ratatui applications: where the floating element
//! goes, when it is visible, and which interactions show or hide it.
//!
//! # Core Concepts
//!
//! - **Positioner**: computes floating coordinates from anchor, size and boundary
//! - **Visibility**: a reducer over [`PopperAction`] with show/hide delays
//! - **Trigger binder**: maps hover/click/focus interactions to actions
//! - **Popper**: lifecycle coordinator owning one positioning instance
//! - **Mask**: outside-click detection for dismissable overlays
//!
//! # Basic Example
//!
//! ```ignore
//! use std::time::Duration;
//! use tui_popper_core::prelude::*;
//!
//! let config = PopperConfig::default()
//!     .with_placement(Placement::Top)
//!     .with_show_after(Duration::from_millis(300));
//! let mut popper = Popper::new(config, ManualScheduler::new())?;
//!
//! // render pass
//! popper.anchor().attach(button_area);
//! popper.floating().attach(Rect::new(0, 0, 24, 3));
//! popper.mount();
//!
//! // event loop
//! popper.handle_mouse(&mouse);
//! popper.advance(elapsed);
//! if let Some(area) = popper.floating_area() {
//!     // draw the tooltip into `area`
//! }
//! ```
//!
//! # Timers
//!
//! Delays go through the [`Scheduler`] trait. [`ManualScheduler`] keeps a
//! virtual clock the host advances from its tick; [`TimerManager`] spawns
//! tokio sleeps that send [`PopperAction::TimerFired`] back over a channel:
//!
//! ```ignore
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<PopperAction>();
//! let mut popper = Popper::new(config, TimerManager::new(tx))?;
//!
//! loop {
//!     tokio::select! {
//!         Some(action) = rx.recv() => { popper.dispatch(action); }
//!         Some(raw) = event_rx.recv() => {
//!             if let EventKind::Mouse(mouse) = process_raw_event(raw) {
//!                 popper.handle_mouse(&mouse);
//!             }
//!         }
//!     }
//! }
//! ```

pub mod action;
pub mod binder;
pub mod bus;
pub mod component;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod mask;
pub mod middleware;
pub mod pointer;
pub mod popper;
pub mod position;
pub mod testing;
pub mod timers;
pub mod trigger;
pub mod visibility;

// Core trait exports
pub use action::{Action, PopperAction};
pub use component::Component;

// Event system exports
pub use bus::{process_raw_event, spawn_event_poller, RawEvent};
pub use event::{EventKind, EventType};

// Popper exports
pub use binder::{Listeners, TriggerBinder, TriggerEvent};
pub use config::{PopperConfig, PopperDefaults};
pub use error::{ConfigError, PositioningError};
pub use mask::Mask;
pub use pointer::PointerTracker;
pub use popper::{Popper, PopperEvent, PopperId};
pub use position::{
    Alignment, ArrowOptions, ArrowPosition, CellPositioner, Coordinates, ElementRef, Placement,
    PopperInstance, PositionOptions, PositionRequest, Positioner, Side, Strategy,
};
pub use trigger::{TriggerConfig, TriggerMode, TriggerSet, TriggerSpec};
pub use visibility::{
    reduce, HideReason, Phase, VisibilityEffect, VisibilityPolicy, VisibilityState,
};

// Timer exports
pub use timers::{
    ManualScheduler, Scheduler, TaskKey, TimerFired, TimerId, TimerManager, TimerSlot,
};

// Middleware and effect exports
pub use effect::DispatchResult;
pub use middleware::{ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, ctrl_key, key, mouse_down, mouse_down_with, mouse_event,
    mouse_move, mouse_up, RenderHarness, TestHarness,
};

#[cfg(feature = "testing-time")]
pub use testing::{advance_time, pause_time, resume_time};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, PopperAction};
    pub use crate::binder::TriggerEvent;
    pub use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
    pub use crate::component::Component;
    pub use crate::config::{PopperConfig, PopperDefaults};
    pub use crate::error::{ConfigError, PositioningError};
    pub use crate::event::{EventKind, EventType};
    pub use crate::middleware::{ComposedMiddleware, LoggingMiddleware, Middleware};
    pub use crate::popper::{Popper, PopperEvent, PopperId};
    pub use crate::position::{Coordinates, ElementRef, Placement, PositionOptions, Strategy};
    pub use crate::timers::{ManualScheduler, Scheduler, TimerManager};
    pub use crate::trigger::{TriggerConfig, TriggerMode};
    pub use crate::visibility::Phase;

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
