//! Popper configuration
//!
//! [`PopperConfig`] is the per-instance configuration a host passes to
//! [`Popper::new`](crate::Popper::new). Shared defaults live in
//! [`PopperDefaults`], which the host creates (or loads from JSON) once and
//! hands to every component it builds; there is no global state.
//!
//! Durations are (de)serialized as whole milliseconds.
//!
//! ```ignore
//! let defaults = PopperDefaults::from_json(r#"{ "show-after": 150, "placement": "top" }"#)?;
//! let config = defaults.config().with_trigger(TriggerConfig::click());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::position::{ArrowOptions, Placement, PositionOptions, Strategy};
use crate::trigger::TriggerConfig;
use crate::visibility::VisibilityPolicy;

/// Serialize a [`Duration`] as milliseconds
pub mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Configuration of one popper instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PopperConfig {
    pub trigger: TriggerConfig,
    pub placement: Placement,
    pub strategy: Strategy,
    /// Cells between anchor and floating element
    pub offset: u16,
    /// Delay before showing
    #[serde(with = "duration_ms")]
    pub show_after: Duration,
    /// Auto-dismiss this long after showing; zero disables
    #[serde(with = "duration_ms")]
    pub hide_after: Duration,
    /// Delay before hiding after a hide request
    #[serde(with = "duration_ms")]
    pub close_delay: Duration,
    /// Keep the popper open while the pointer is over the floating content
    pub enterable: bool,
    pub disabled: bool,
    /// Externally controlled visibility; required in manual mode
    pub visible: Option<bool>,
    pub show_arrow: bool,
    /// Minimum cells between the arrow and the floating corners
    pub arrow_offset: u16,
    /// Padding kept between the floating element and the boundary
    pub boundaries_padding: u16,
    /// Flip to the opposite side when the preferred one overflows
    pub flip: bool,
    /// Close on a click outside anchor and floating content
    pub mask: bool,
    /// Replaces every generated positioning option
    pub position_override: Option<PositionOptions>,
}

impl Default for PopperConfig {
    fn default() -> Self {
        PopperDefaults::default().config()
    }
}

impl PopperConfig {
    /// Check the configuration for `scope` (the component name in messages).
    ///
    /// # Errors
    ///
    /// [`ConfigError::ManualWithoutVisible`] when the trigger is manual but no
    /// `visible` value is bound.
    pub fn validate(&self, scope: &'static str) -> Result<(), ConfigError> {
        if self.trigger.is_manual() && self.visible.is_none() {
            return Err(ConfigError::ManualWithoutVisible { scope });
        }
        Ok(())
    }

    /// Positioning options derived from this configuration
    pub fn position_options(&self) -> PositionOptions {
        if let Some(options) = &self.position_override {
            return options.clone();
        }
        PositionOptions {
            placement: self.placement,
            strategy: self.strategy,
            offset: self.offset,
            fallback_placements: if self.flip { None } else { Some(Vec::new()) },
            boundary_padding: self.boundaries_padding,
            arrow: self.show_arrow.then_some(ArrowOptions {
                padding: self.arrow_offset,
            }),
        }
    }

    /// Timer and guard settings for the state machine
    pub fn policy(&self) -> VisibilityPolicy {
        VisibilityPolicy {
            show_after: self.show_after,
            hide_after: self.hide_after,
            close_delay: self.close_delay,
            enterable: self.enterable,
            manual: self.trigger.is_manual(),
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_offset(mut self, offset: u16) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_show_after(mut self, delay: Duration) -> Self {
        self.show_after = delay;
        self
    }

    pub fn with_hide_after(mut self, delay: Duration) -> Self {
        self.hide_after = delay;
        self
    }

    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    pub fn with_enterable(mut self, enterable: bool) -> Self {
        self.enterable = enterable;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_visible(mut self, visible: Option<bool>) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_arrow(mut self, show_arrow: bool) -> Self {
        self.show_arrow = show_arrow;
        self
    }

    pub fn with_position_override(mut self, options: PositionOptions) -> Self {
        self.position_override = Some(options);
        self
    }
}

/// Defaults shared by every popper a host builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PopperDefaults {
    pub trigger: TriggerConfig,
    pub placement: Placement,
    pub strategy: Strategy,
    pub offset: u16,
    #[serde(with = "duration_ms")]
    pub show_after: Duration,
    #[serde(with = "duration_ms")]
    pub hide_after: Duration,
    #[serde(with = "duration_ms")]
    pub close_delay: Duration,
    pub enterable: bool,
    pub show_arrow: bool,
    pub arrow_offset: u16,
    pub boundaries_padding: u16,
    pub flip: bool,
}

impl Default for PopperDefaults {
    fn default() -> Self {
        Self {
            trigger: TriggerConfig::hover(),
            placement: Placement::Bottom,
            strategy: Strategy::Absolute,
            offset: 0,
            show_after: Duration::ZERO,
            hide_after: Duration::ZERO,
            close_delay: Duration::ZERO,
            enterable: true,
            show_arrow: true,
            arrow_offset: 1,
            boundaries_padding: 0,
            flip: true,
        }
    }
}

impl PopperDefaults {
    /// Load defaults from JSON; missing fields keep the built-in values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// A fresh per-instance configuration seeded with these defaults
    pub fn config(&self) -> PopperConfig {
        PopperConfig {
            trigger: self.trigger,
            placement: self.placement,
            strategy: self.strategy,
            offset: self.offset,
            show_after: self.show_after,
            hide_after: self.hide_after,
            close_delay: self.close_delay,
            enterable: self.enterable,
            disabled: false,
            visible: None,
            show_arrow: self.show_arrow,
            arrow_offset: self.arrow_offset,
            boundaries_padding: self.boundaries_padding,
            flip: self.flip,
            mask: false,
            position_override: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PopperConfig::default();
        assert_eq!(config.trigger, TriggerConfig::hover());
        assert_eq!(config.placement, Placement::Bottom);
        assert!(config.enterable);
        assert!(config.show_arrow);
        assert_eq!(config.close_delay, Duration::ZERO);
        assert_eq!(config.visible, None);
    }

    #[test]
    fn test_manual_requires_visible() {
        let config = PopperConfig::default().with_trigger(TriggerConfig::Manual);
        assert_eq!(
            config.validate("Popper"),
            Err(ConfigError::ManualWithoutVisible { scope: "Popper" })
        );
        assert!(config.with_visible(Some(false)).validate("Popper").is_ok());
    }

    #[test]
    fn test_position_options() {
        let options = PopperConfig::default()
            .with_placement(Placement::Top)
            .with_offset(1)
            .with_flip(false)
            .position_options();
        assert_eq!(options.placement, Placement::Top);
        assert_eq!(options.offset, 1);
        assert_eq!(options.fallback_placements, Some(vec![]));
        assert_eq!(options.arrow, Some(ArrowOptions { padding: 1 }));

        let no_arrow = PopperConfig::default().with_arrow(false).position_options();
        assert_eq!(no_arrow.arrow, None);
        assert_eq!(no_arrow.fallback_placements, None);
    }

    #[test]
    fn test_override_replaces_generated_options() {
        let custom = PositionOptions {
            placement: Placement::LeftEnd,
            strategy: Strategy::Fixed,
            ..Default::default()
        };
        let options = PopperConfig::default()
            .with_placement(Placement::Top)
            .with_position_override(custom.clone())
            .position_options();
        assert_eq!(options, custom);
    }

    #[test]
    fn test_policy_reflects_trigger() {
        let policy = PopperConfig::default()
            .with_trigger(TriggerConfig::Manual)
            .with_show_after(Duration::from_millis(50))
            .policy();
        assert!(policy.manual);
        assert_eq!(policy.show_after, Duration::from_millis(50));
    }

    #[test]
    fn test_defaults_from_json() {
        let defaults = PopperDefaults::from_json(
            r#"{ "trigger": ["click", "focus"], "show-after": 150, "placement": "top-start" }"#,
        )
        .unwrap();
        assert_eq!(defaults.show_after, Duration::from_millis(150));
        assert_eq!(defaults.placement, Placement::TopStart);
        assert!(defaults.enterable);

        let config = defaults.config();
        assert!(config.trigger.contains(crate::TriggerMode::Focus));
        assert_eq!(config.show_after, Duration::from_millis(150));
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            PopperConfig::from_json(r#"{ "trigger": "press" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_serializes_durations_as_millis() {
        let config = PopperConfig::default().with_close_delay(Duration::from_millis(300));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["close-delay"], 300);
        assert_eq!(value["trigger"], serde_json::json!(["hover"]));
    }
}
