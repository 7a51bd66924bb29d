//! Floating box rendering shared by tooltips and popovers

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_popper_core::{Coordinates, EventKind, Popper, PopperEvent, Scheduler, Side, TriggerEvent};

/// Appearance of a floating box
#[derive(Debug, Clone, Copy)]
pub struct FloatingStyle {
    pub border: Style,
    pub content: Style,
    pub arrow: Style,
}

impl Default for FloatingStyle {
    fn default() -> Self {
        Self {
            border: Style::new().fg(Color::DarkGray),
            content: Style::new(),
            arrow: Style::new().fg(Color::DarkGray),
        }
    }
}

impl FloatingStyle {
    /// Dark box with light text, the usual tooltip look
    pub fn dark() -> Self {
        Self {
            border: Style::new().fg(Color::Gray).bg(Color::Black),
            content: Style::new().fg(Color::White).bg(Color::Black),
            arrow: Style::new().fg(Color::Gray).bg(Color::Black),
        }
    }
}

/// Glyph drawn in the arrow cell, pointing back at the anchor
pub fn arrow_glyph(side: Side) -> &'static str {
    match side {
        Side::Bottom => "▲",
        Side::Top => "▼",
        Side::Left => "▶",
        Side::Right => "◀",
    }
}

/// Outer size of a bordered box holding `content` unwrapped
pub fn content_size(content: &str) -> (u16, u16) {
    let lines: Vec<&str> = content.lines().collect();
    let width = lines
        .iter()
        .map(|line| Line::raw(*line).width())
        .max()
        .unwrap_or(0);
    let height = lines.len().max(1);
    (
        u16::try_from(width).unwrap_or(u16::MAX).saturating_add(2),
        u16::try_from(height).unwrap_or(u16::MAX).saturating_add(2),
    )
}

/// Outer height of a bordered box of `width` cells holding `content` wrapped
pub fn wrapped_height(content: &str, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let rows: usize = content
        .lines()
        .map(|line| Line::raw(line).width().div_ceil(inner).max(1))
        .sum();
    u16::try_from(rows.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

/// Draw a bordered floating box at `coords`, clipped to the frame.
///
/// Clears whatever was drawn beneath first; call it after the rest of the UI.
pub fn render_floating(
    frame: &mut Frame,
    coords: &Coordinates,
    content: Text<'_>,
    title: Option<&str>,
    style: &FloatingStyle,
) {
    let area = coords.rect.intersection(frame.area());
    if area.is_empty() {
        return;
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(style.border)
        .style(style.content);
    if let Some(title) = title {
        block = block.title(Line::raw(title.to_string()));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .style(style.content)
            .wrap(Wrap { trim: false }),
        area,
    );

    if let Some(arrow) = coords.arrow {
        let cell = Position::new(arrow.x, arrow.y);
        if area.contains(cell) {
            let buf = frame.buffer_mut();
            buf[(arrow.x, arrow.y)]
                .set_symbol(arrow_glyph(coords.placement.side()))
                .set_style(style.arrow);
        }
    }
}

/// Record the laid-out areas and run the mount/update lifecycle step.
pub(crate) fn layout<S: Scheduler>(
    popper: &mut Popper<S>,
    anchor: Rect,
    size: (u16, u16),
    boundary: Rect,
) {
    popper.anchor().attach(anchor);
    popper.floating().attach(Rect::new(0, 0, size.0, size.1));
    popper.boundary().attach(boundary);
    if popper.is_mounted() {
        popper.updated();
    } else {
        popper.mount();
    }
}

/// Feed a host event to `popper`, turning host focus changes into
/// focus/blur interactions, and return the notifications it produced.
pub(crate) fn drive<S: Scheduler>(
    popper: &mut Popper<S>,
    was_focused: &mut bool,
    event: &EventKind,
    focused: bool,
) -> Vec<PopperEvent> {
    if focused != *was_focused {
        *was_focused = focused;
        let interaction = if focused {
            TriggerEvent::Focus
        } else {
            TriggerEvent::Blur
        };
        popper.handle(interaction);
    }
    if let Some(mouse) = event.mouse() {
        popper.handle_mouse(mouse);
    }
    popper.drain_events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_popper_core::testing::RenderHarness;
    use tui_popper_core::{ArrowPosition, Placement, Strategy};

    fn coords(rect: Rect, arrow: Option<ArrowPosition>) -> Coordinates {
        Coordinates {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
            rect,
            placement: Placement::Bottom,
            strategy: Strategy::Fixed,
            arrow,
        }
    }

    #[test]
    fn test_content_size_counts_borders() {
        assert_eq!(content_size("hello"), (7, 3));
        assert_eq!(content_size("a\nlonger"), (8, 4));
        assert_eq!(content_size(""), (2, 3));
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("abcdef", 5), 4);
        assert_eq!(wrapped_height("ab\ncd", 10), 4);
    }

    #[test]
    fn test_render_floating_draws_box_and_arrow() {
        let mut harness = RenderHarness::new(12, 5);
        let output = harness.render_to_string_plain(|frame| {
            render_floating(
                frame,
                &coords(
                    Rect::new(1, 1, 7, 3),
                    Some(ArrowPosition { x: 4, y: 1 }),
                ),
                Text::raw("hello"),
                None,
                &FloatingStyle::default(),
            );
        });

        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(rows[1], " ┌──▲──┐    ");
        assert_eq!(rows[2], " │hello│    ");
        assert_eq!(rows[3], " └─────┘    ");
    }

    #[test]
    fn test_render_floating_clips_to_frame() {
        let mut harness = RenderHarness::new(6, 3);
        let output = harness.render_to_string_plain(|frame| {
            render_floating(
                frame,
                &coords(Rect::new(3, 1, 10, 3), None),
                Text::raw("clipped"),
                Some("t"),
                &FloatingStyle::default(),
            );
        });
        assert!(output.lines().next().unwrap().trim().is_empty());
        assert!(output.contains('┌'));
    }

    #[test]
    fn test_arrow_points_at_anchor() {
        assert_eq!(arrow_glyph(Side::Top), "▼");
        assert_eq!(arrow_glyph(Side::Right), "◀");
    }
}
