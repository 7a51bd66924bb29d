//! Mask overlay beneath an open floating element
//!
//! Re-styles everything drawn so far on each frame, so the background keeps
//! updating while it is dimmed. Clicks on it are detected by
//! [`tui_popper_core::Mask`]; this module only draws.

use ratatui::{
    style::{Color, Modifier, Style},
    Frame,
};

/// Configuration for mask appearance
#[derive(Debug, Clone, Copy)]
pub struct MaskStyle {
    /// Modifier added to every cell beneath the mask
    pub modifier: Modifier,
    /// Foreground override for masked cells
    pub fg: Option<Color>,
}

impl Default for MaskStyle {
    fn default() -> Self {
        Self {
            modifier: Modifier::DIM,
            fg: None,
        }
    }
}

impl MaskStyle {
    /// Mask that also recolors the background text
    pub fn with_fg(fg: Color) -> Self {
        Self {
            fg: Some(fg),
            ..Default::default()
        }
    }

    fn style(&self) -> Style {
        let style = Style::new().add_modifier(self.modifier);
        match self.fg {
            Some(fg) => style.fg(fg),
            None => style,
        }
    }
}

/// Render the mask over the whole frame
///
/// Call this AFTER rendering background content and BEFORE the floating box.
pub fn render_mask(frame: &mut Frame, style: &MaskStyle) {
    let area = frame.area();
    frame.buffer_mut().set_style(area, style.style());
}
