//! Error types
//!
//! Configuration errors are fatal and surface at setup time so a misconfigured
//! host fails fast. Positioning errors are expected while elements are not yet
//! laid out; the lifecycle coordinator logs them and carries on.

/// Invalid popper configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A trigger name that is not one of `hover`, `click`, `focus`, `manual`
    #[error("[tui-popper] unknown trigger mode `{0}`")]
    UnknownTrigger(String),

    /// A trigger list with no entries
    #[error("[tui-popper] trigger list must not be empty")]
    EmptyTrigger,

    /// `manual` mixed with automatic trigger modes
    #[error("[tui-popper] `manual` cannot be combined with other trigger modes")]
    ManualCombined,

    /// Manual mode without a host-controlled visibility value
    #[error("[{scope}] manual mode requires an externally controlled `visible` value")]
    ManualWithoutVisible {
        /// Component that rejected the configuration
        scope: &'static str,
    },

    /// A placement name outside the twelve supported values
    #[error("[tui-popper] unknown placement `{0}`")]
    UnknownPlacement(String),

    /// A strategy name other than `absolute` or `fixed`
    #[error("[tui-popper] unknown positioning strategy `{0}`")]
    UnknownStrategy(String),

    /// Defaults could not be parsed
    #[error("[tui-popper] invalid defaults: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Failure to compute a floating element position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositioningError {
    /// The anchor has no laid-out area yet
    #[error("anchor element is not attached to a renderable surface")]
    AnchorDetached,

    /// The floating element has no laid-out area yet
    #[error("floating element is not attached to a renderable surface")]
    FloatingDetached,

    /// The instance was already destroyed
    #[error("popper instance has been destroyed")]
    Destroyed,
}
