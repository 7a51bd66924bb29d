//! Click-triggered popover with a title and a fixed width

use ratatui::{layout::Rect, text::Text, Frame};
use tui_popper_core::{
    Component, ConfigError, EventKind, ManualScheduler, Popper, PopperConfig, PopperDefaults,
    PopperEvent, Scheduler, TriggerConfig,
};

use crate::floating::{drive, layout, render_floating, wrapped_height, FloatingStyle};
use crate::mask::{render_mask, MaskStyle};

const DEFAULT_WIDTH: u16 = 30;

/// Props for [`Popover`]
#[derive(Debug, Clone, Copy)]
pub struct PopoverProps<'a> {
    /// Body text, wrapped to the popover width
    pub content: &'a str,
    /// Whether the anchor currently has host focus
    pub focused: bool,
}

/// Bordered panel opened from an anchor, by default on click.
///
/// With `config.mask` set, everything behind the open panel is dimmed and a
/// click anywhere outside the anchor and the panel closes it.
pub struct Popover<S: Scheduler = ManualScheduler> {
    popper: Popper<S>,
    title: Option<String>,
    width: u16,
    style: FloatingStyle,
    mask_style: MaskStyle,
    focused: bool,
}

impl<S: Scheduler> Popover<S> {
    /// Popper settings popovers start from: click trigger, otherwise the
    /// built-in defaults
    pub fn default_config() -> PopperConfig {
        PopperDefaults::default()
            .config()
            .with_trigger(TriggerConfig::click())
    }

    /// # Errors
    ///
    /// Manual trigger without a bound `visible` value.
    pub fn new(config: PopperConfig, scheduler: S) -> Result<Self, ConfigError> {
        Ok(Self {
            popper: Popper::with_scope("Popover", config, scheduler)?,
            title: None,
            width: DEFAULT_WIDTH,
            style: FloatingStyle::default(),
            mask_style: MaskStyle::default(),
            focused: false,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Outer width in cells, borders included
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width.max(3);
        self
    }

    pub fn with_style(mut self, style: FloatingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_mask_style(mut self, style: MaskStyle) -> Self {
        self.mask_style = style;
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

    /// Close the popover immediately, whatever opened it
    pub fn hide(&mut self) -> Vec<PopperEvent> {
        self.popper.hide();
        self.popper.drain_events()
    }
}

impl<S: Scheduler> Component<PopperEvent> for Popover<S> {
    type Props<'a> = PopoverProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = PopperEvent> {
        drive(&mut self.popper, &mut self.focused, event, props.focused)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let size = (self.width, wrapped_height(props.content, self.width));
        layout(&mut self.popper, area, size, frame.area());
        if !self.popper.is_visible() {
            return;
        }
        let Some(coords) = self.popper.coordinates() else {
            return;
        };
        if self.popper.mask().is_enabled() {
            render_mask(frame, &self.mask_style);
        }
        render_floating(
            frame,
            &coords,
            Text::raw(props.content),
            self.title.as_deref(),
            &self.style,
        );
    }
}
