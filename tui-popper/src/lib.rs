//! tui-popper: Tooltips, popovers and floating overlays for Rust TUI apps
//!
//! Anchor a floating element to any laid-out area, open it on hover, click
//! or focus (with delays), keep it on screen by flipping and shifting, and
//! dismiss it on an outside click.
//!
//! # Example
//! ```ignore
//! use tui_popper::prelude::*;
//!
//! let mut tooltip = Tooltip::new(
//!     TooltipConfig::default().with_placement(Placement::Top),
//!     ManualScheduler::new(),
//! )?;
//!
//! // event loop
//! for event in tooltip.handle_event(&event, props) {
//!     if let PopperEvent::VisibleChanged(visible) = event { /* ... */ }
//! }
//! tooltip.tick(elapsed);
//! ```

// Re-export everything from core
pub use tui_popper_core::*;

// Re-export components
#[cfg(feature = "components")]
pub use tui_popper_components::*;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_popper_core::{Action, Component, Positioner, Scheduler};

    // Event system
    pub use tui_popper_core::{
        process_raw_event, spawn_event_poller, EventKind, EventType, RawEvent,
    };

    // Popper
    pub use tui_popper_core::{
        ConfigError, Coordinates, ElementRef, ManualScheduler, Phase, Placement, Popper,
        PopperAction, PopperConfig, PopperDefaults, PopperEvent, PositionOptions,
        PositioningError, Strategy, TimerManager, TriggerConfig, TriggerEvent, TriggerMode,
    };

    // Middleware
    pub use tui_popper_core::{ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware};

    // Components
    #[cfg(feature = "components")]
    pub use tui_popper_components::{
        render_floating, render_mask, FloatingStyle, MaskStyle, Popover, PopoverProps, Tooltip,
        TooltipConfig, TooltipProps,
    };

    // Ratatui re-exports
    pub use tui_popper_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
