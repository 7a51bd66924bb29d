//! Hover tooltip
//!
//! A [`Tooltip`] owns one [`Popper`] and renders a small bordered box next to
//! an anchor area. The host draws the anchor itself, then calls
//! [`Component::render`] with the anchor's area once everything else is on
//! screen so the box lands on top.

use std::time::Duration;

use ratatui::{layout::Rect, text::Text, Frame};
use tui_popper_core::{
    Component, ConfigError, EventKind, ManualScheduler, Placement, Popper, PopperConfig,
    PopperDefaults, PopperEvent, PositionOptions, Scheduler, TriggerConfig,
};

use crate::floating::{content_size, drive, layout, render_floating, FloatingStyle};

/// Tooltip settings.
///
/// Everything a plain popper takes, plus `open_delay`: a non-zero
/// `open_delay` wins over `show_after`.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipConfig {
    pub popper: PopperConfig,
    pub open_delay: Duration,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self::from_defaults(&PopperDefaults::default())
    }
}

impl TooltipConfig {
    pub fn from_defaults(defaults: &PopperDefaults) -> Self {
        Self {
            popper: defaults.config(),
            open_delay: Duration::ZERO,
        }
    }

    pub fn with_trigger(mut self, trigger: TriggerConfig) -> Self {
        self.popper.trigger = trigger;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.popper.placement = placement;
        self
    }

    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = delay;
        self
    }

    pub fn with_hide_after(mut self, delay: Duration) -> Self {
        self.popper.hide_after = delay;
        self
    }

    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.popper.close_delay = delay;
        self
    }

    pub fn with_enterable(mut self, enterable: bool) -> Self {
        self.popper.enterable = enterable;
        self
    }

    pub fn with_visible_arrow(mut self, visible: bool) -> Self {
        self.popper.show_arrow = visible;
        self
    }

    pub fn with_visible(mut self, visible: Option<bool>) -> Self {
        self.popper.visible = visible;
        self
    }

    /// Full control over positioning; replaces every generated option
    pub fn with_popper_options(mut self, options: PositionOptions) -> Self {
        self.popper.position_override = Some(options);
        self
    }

    /// Resolved popper configuration
    pub fn popper_config(&self) -> PopperConfig {
        let mut config = self.popper.clone();
        if !self.open_delay.is_zero() {
            config.show_after = self.open_delay;
        }
        config
    }
}

/// Props for [`Tooltip`]
#[derive(Debug, Clone, Copy)]
pub struct TooltipProps<'a> {
    /// Text shown in the box; one row per line
    pub content: &'a str,
    /// Whether the anchor currently has host focus
    pub focused: bool,
}

/// Floating hint attached to an anchor area
pub struct Tooltip<S: Scheduler = ManualScheduler> {
    popper: Popper<S>,
    style: FloatingStyle,
    focused: bool,
}

impl<S: Scheduler> Tooltip<S> {
    /// # Errors
    ///
    /// Manual trigger without a bound `visible` value.
    pub fn new(config: TooltipConfig, scheduler: S) -> Result<Self, ConfigError> {
        let popper = Popper::with_scope("Tooltip", config.popper_config(), scheduler)?;
        Ok(Self {
            popper,
            style: FloatingStyle::dark(),
            focused: false,
        })
    }

    pub fn with_style(mut self, style: FloatingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn popper(&self) -> &Popper<S> {
        &self.popper
    }

    pub fn popper_mut(&mut self) -> &mut Popper<S> {
        &mut self.popper
    }

    pub fn is_visible(&self) -> bool {
        self.popper.is_visible()
    }

    pub fn show(&mut self) -> Vec<PopperEvent> {
        self.popper.show();
        self.popper.drain_events()
    }

    pub fn hide(&mut self) -> Vec<PopperEvent> {
        self.popper.hide();
        self.popper.drain_events()
    }
}

impl Tooltip<ManualScheduler> {
    /// Advance show/hide delays by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) -> Vec<PopperEvent> {
        self.popper.advance(elapsed);
        self.popper.drain_events()
    }
}

impl<S: Scheduler> Component<PopperEvent> for Tooltip<S> {
    type Props<'a> = TooltipProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = PopperEvent> {
        drive(&mut self.popper, &mut self.focused, event, props.focused)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        layout(
            &mut self.popper,
            area,
            content_size(props.content),
            frame.area(),
        );
        if !self.popper.is_visible() {
            return;
        }
        if let Some(coords) = self.popper.coordinates() {
            render_floating(frame, &coords, Text::raw(props.content), None, &self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use tui_popper_core::testing::{mouse_move, RenderHarness};
    use tui_popper_core::{assert_emitted, Phase};

    const ANCHOR: (u16, u16, u16, u16) = (5, 2, 6, 1);

    fn anchor() -> Rect {
        let (x, y, w, h) = ANCHOR;
        Rect::new(x, y, w, h)
    }

    fn props(focused: bool) -> TooltipProps<'static> {
        TooltipProps {
            content: "hint",
            focused,
        }
    }

    fn draw<S: Scheduler>(
        harness: &mut RenderHarness,
        tooltip: &mut Tooltip<S>,
        focused: bool,
    ) -> String {
        harness.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("button"), anchor());
            tooltip.render(frame, anchor(), props(focused));
        })
    }

    fn hover(tooltip: &mut Tooltip, column: u16, row: u16) -> Vec<PopperEvent> {
        tooltip
            .handle_event(&EventKind::Mouse(mouse_move(column, row)), props(false))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_open_delay_wins_over_show_after() {
        let mut config = TooltipConfig::default().with_open_delay(Duration::from_millis(200));
        config.popper.show_after = Duration::from_millis(50);
        assert_eq!(config.popper_config().show_after, Duration::from_millis(200));

        let config = TooltipConfig::default();
        assert_eq!(config.popper_config().show_after, Duration::ZERO);
        assert!(config.popper_config().enterable);
        assert_eq!(config.popper_config().placement, Placement::Bottom);
    }

    #[test]
    fn test_hover_shows_and_leave_hides() {
        let mut harness = RenderHarness::new(30, 8);
        let mut tooltip = Tooltip::new(TooltipConfig::default(), ManualScheduler::new()).unwrap();

        let output = draw(&mut harness, &mut tooltip, false);
        assert!(!output.contains("hint"));

        let events = hover(&mut tooltip, 6, 2);
        assert_emitted!(events, PopperEvent::VisibleChanged(true));

        let output = draw(&mut harness, &mut tooltip, false);
        assert!(output.contains("button"));
        assert!(output.contains("hint"));
        assert!(output.contains('▲'));

        let events = hover(&mut tooltip, 25, 7);
        assert_emitted!(events, PopperEvent::VisibleChanged(false));
        assert!(!draw(&mut harness, &mut tooltip, false).contains("hint"));
    }

    #[test]
    fn test_open_delay_waits_for_tick() {
        let mut harness = RenderHarness::new(30, 8);
        let config = TooltipConfig::default().with_open_delay(Duration::from_millis(200));
        let mut tooltip = Tooltip::new(config, ManualScheduler::new()).unwrap();
        draw(&mut harness, &mut tooltip, false);

        assert!(hover(&mut tooltip, 6, 2).is_empty());
        assert_eq!(tooltip.popper().phase(), Phase::PendingShow);

        assert!(tooltip.tick(Duration::from_millis(199)).is_empty());
        assert_eq!(
            tooltip.tick(Duration::from_millis(1)),
            vec![PopperEvent::VisibleChanged(true)]
        );
    }

    #[test]
    fn test_focus_trigger_follows_host_focus() {
        let mut harness = RenderHarness::new(30, 8);
        let config = TooltipConfig::default().with_trigger(TriggerConfig::focus());
        let mut tooltip = Tooltip::new(config, ManualScheduler::new()).unwrap();
        draw(&mut harness, &mut tooltip, false);

        let events: Vec<_> = tooltip
            .handle_event(&EventKind::Tick, props(true))
            .into_iter()
            .collect();
        assert_eq!(events, vec![PopperEvent::VisibleChanged(true)]);
        assert!(draw(&mut harness, &mut tooltip, true).contains("hint"));

        // Hovering does nothing without the hover trigger
        assert!(tooltip
            .handle_event(&EventKind::Mouse(mouse_move(25, 7)), props(true))
            .into_iter()
            .next()
            .is_none());

        let events: Vec<_> = tooltip
            .handle_event(&EventKind::Tick, props(false))
            .into_iter()
            .collect();
        assert_eq!(events, vec![PopperEvent::VisibleChanged(false)]);
    }

    #[test]
    fn test_hidden_arrow() {
        let mut harness = RenderHarness::new(30, 8);
        let config = TooltipConfig::default().with_visible_arrow(false);
        let mut tooltip = Tooltip::new(config, ManualScheduler::new()).unwrap();
        draw(&mut harness, &mut tooltip, false);
        tooltip.show();
        let output = draw(&mut harness, &mut tooltip, false);
        assert!(output.contains("hint"));
        assert!(!output.contains('▲'));
    }

    #[test]
    fn test_manual_without_visible_names_tooltip() {
        let config = TooltipConfig::default().with_trigger(TriggerConfig::Manual);
        let err = Tooltip::new(config, ManualScheduler::new()).err().unwrap();
        assert_eq!(err, ConfigError::ManualWithoutVisible { scope: "Tooltip" });
    }
}
