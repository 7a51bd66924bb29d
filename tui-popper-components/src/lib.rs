//! Pre-built floating components for tui-popper
//!
//! Components implement the `Component<PopperEvent>` trait: `handle_event`
//! feeds host events into the component's popper and returns the visibility
//! notifications it produced, `render` draws the floating box on top of
//! whatever the host already drew.
//!
//! # Components
//!
//! - [`Tooltip`] - Hover hint with show/hide delays and an arrow
//! - [`Popover`] - Click-triggered panel with title, fixed width and optional mask
//! - [`render_floating`] / [`render_mask`] - The drawing primitives both use
//!
//! # Example
//!
//! ```ignore
//! use tui_popper_components::{Tooltip, TooltipConfig, TooltipProps};
//!
//! let mut tooltip = Tooltip::new(TooltipConfig::default(), ManualScheduler::new())?;
//!
//! // In your render function, after drawing the button:
//! frame.render_widget(Paragraph::new("Save"), button_area);
//! tooltip.render(frame, button_area, TooltipProps {
//!     content: "Write changes to disk",
//!     focused: state.focus == Focus::Save,
//! });
//! ```

mod floating;
mod mask;
mod popover;
mod tooltip;

pub use floating::{arrow_glyph, content_size, render_floating, wrapped_height, FloatingStyle};
pub use mask::{render_mask, MaskStyle};
pub use popover::{Popover, PopoverProps};
pub use tooltip::{Tooltip, TooltipConfig, TooltipProps};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        render_floating, render_mask, FloatingStyle, MaskStyle, Popover, PopoverProps, Tooltip,
        TooltipConfig, TooltipProps,
    };
}
