//! Trigger modes and trigger configuration
//!
//! A trigger configuration is either `manual` (the host drives visibility and
//! no listeners are bound) or a non-empty set of automatic modes. Unknown mode
//! names are rejected when the configuration is built, never at event time.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single interaction type that can drive visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// Pointer enter shows, pointer leave hides
    Hover,
    /// Click toggles
    Click,
    /// Focus shows, blur hides
    Focus,
    /// Visibility is controlled by the host only
    Manual,
}

impl TriggerMode {
    /// The configuration name of this mode
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerMode::Hover => "hover",
            TriggerMode::Click => "click",
            TriggerMode::Focus => "focus",
            TriggerMode::Manual => "manual",
        }
    }
}

impl FromStr for TriggerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hover" => Ok(TriggerMode::Hover),
            "click" => Ok(TriggerMode::Click),
            "focus" => Ok(TriggerMode::Focus),
            "manual" => Ok(TriggerMode::Manual),
            _ => Err(ConfigError::UnknownTrigger(s.to_string())),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of automatic trigger modes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TriggerSet: u8 {
        const HOVER = 0b001;
        const CLICK = 0b010;
        const FOCUS = 0b100;
    }
}

/// Validated trigger configuration.
///
/// Immutable once a popper is built; changing it goes through
/// [`Popper::rebind`](crate::Popper::rebind), which re-creates the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TriggerSpec", into = "TriggerSpec")]
pub enum TriggerConfig {
    /// No automatic listeners
    Manual,
    /// One or more automatic modes (never empty)
    Auto(TriggerSet),
}

impl Default for TriggerConfig {
    fn default() -> Self {
        TriggerConfig::Auto(TriggerSet::HOVER)
    }
}

impl TriggerConfig {
    /// Hover-only trigger (the default)
    pub fn hover() -> Self {
        TriggerConfig::Auto(TriggerSet::HOVER)
    }

    /// Click-only trigger
    pub fn click() -> Self {
        TriggerConfig::Auto(TriggerSet::CLICK)
    }

    /// Focus-only trigger
    pub fn focus() -> Self {
        TriggerConfig::Auto(TriggerSet::FOCUS)
    }

    /// Build a configuration from a list of modes.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyTrigger`] for an empty list
    /// - [`ConfigError::ManualCombined`] when `manual` appears next to another mode
    pub fn from_modes<I>(modes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = TriggerMode>,
    {
        let mut set = TriggerSet::empty();
        let mut manual = false;
        let mut any = false;

        for mode in modes {
            any = true;
            match mode {
                TriggerMode::Manual => manual = true,
                TriggerMode::Hover => set |= TriggerSet::HOVER,
                TriggerMode::Click => set |= TriggerSet::CLICK,
                TriggerMode::Focus => set |= TriggerSet::FOCUS,
            }
        }

        match (any, manual, set.is_empty()) {
            (false, _, _) => Err(ConfigError::EmptyTrigger),
            (true, true, true) => Ok(TriggerConfig::Manual),
            (true, true, false) => Err(ConfigError::ManualCombined),
            (true, false, _) => Ok(TriggerConfig::Auto(set)),
        }
    }

    /// Parse a comma or whitespace separated list, e.g. `"hover, focus"`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let modes = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(TriggerMode::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_modes(modes)
    }

    /// Whether this is manual mode
    pub fn is_manual(&self) -> bool {
        matches!(self, TriggerConfig::Manual)
    }

    /// Whether the given automatic mode is configured
    pub fn contains(&self, mode: TriggerMode) -> bool {
        match (self, mode) {
            (TriggerConfig::Manual, TriggerMode::Manual) => true,
            (TriggerConfig::Manual, _) => false,
            (TriggerConfig::Auto(_), TriggerMode::Manual) => false,
            (TriggerConfig::Auto(set), TriggerMode::Hover) => set.contains(TriggerSet::HOVER),
            (TriggerConfig::Auto(set), TriggerMode::Click) => set.contains(TriggerSet::CLICK),
            (TriggerConfig::Auto(set), TriggerMode::Focus) => set.contains(TriggerSet::FOCUS),
        }
    }

    /// The configured modes in canonical order
    pub fn modes(&self) -> Vec<TriggerMode> {
        match self {
            TriggerConfig::Manual => vec![TriggerMode::Manual],
            TriggerConfig::Auto(_) => [TriggerMode::Hover, TriggerMode::Click, TriggerMode::Focus]
                .into_iter()
                .filter(|mode| self.contains(*mode))
                .collect(),
        }
    }
}

impl FromStr for TriggerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&[TriggerMode]> for TriggerConfig {
    type Error = ConfigError;

    fn try_from(modes: &[TriggerMode]) -> Result<Self, Self::Error> {
        Self::from_modes(modes.iter().copied())
    }
}

/// Serialized form of a [`TriggerConfig`]: a single name or a list of names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerSpec {
    /// `"hover"`
    One(String),
    /// `["hover", "click"]`
    Many(Vec<String>),
}

impl TryFrom<TriggerSpec> for TriggerConfig {
    type Error = ConfigError;

    fn try_from(spec: TriggerSpec) -> Result<Self, Self::Error> {
        let names = match spec {
            TriggerSpec::One(name) => vec![name],
            TriggerSpec::Many(names) => names,
        };
        let modes = names
            .iter()
            .map(|name| name.parse::<TriggerMode>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_modes(modes)
    }
}

impl From<TriggerConfig> for TriggerSpec {
    fn from(config: TriggerConfig) -> Self {
        TriggerSpec::Many(
            config
                .modes()
                .into_iter()
                .map(|mode| mode.as_str().to_string())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_combined() {
        assert_eq!(TriggerConfig::parse("hover").unwrap(), TriggerConfig::hover());

        let config = TriggerConfig::parse("hover, click focus").unwrap();
        assert!(config.contains(TriggerMode::Hover));
        assert!(config.contains(TriggerMode::Click));
        assert!(config.contains(TriggerMode::Focus));
        assert!(!config.is_manual());
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert_eq!(
            TriggerConfig::parse("hover,contextmenu"),
            Err(ConfigError::UnknownTrigger("contextmenu".into()))
        );
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(TriggerConfig::parse(""), Err(ConfigError::EmptyTrigger));
        assert_eq!(
            TriggerConfig::from_modes(Vec::new()),
            Err(ConfigError::EmptyTrigger)
        );
    }

    #[test]
    fn test_manual_alone_and_combined() {
        assert_eq!(TriggerConfig::parse("manual").unwrap(), TriggerConfig::Manual);
        assert_eq!(
            TriggerConfig::parse("manual,click"),
            Err(ConfigError::ManualCombined)
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let config = TriggerConfig::parse("click,click").unwrap();
        assert_eq!(config, TriggerConfig::click());
        assert_eq!(config.modes(), vec![TriggerMode::Click]);
    }

    #[test]
    fn test_serde_accepts_string_or_list() {
        let one: TriggerConfig = serde_json::from_str("\"focus\"").unwrap();
        assert_eq!(one, TriggerConfig::focus());

        let many: TriggerConfig = serde_json::from_str("[\"hover\", \"click\"]").unwrap();
        assert_eq!(
            many,
            TriggerConfig::Auto(TriggerSet::HOVER | TriggerSet::CLICK)
        );

        let json = serde_json::to_string(&many).unwrap();
        assert_eq!(json, "[\"hover\",\"click\"]");

        assert!(serde_json::from_str::<TriggerConfig>("[]").is_err());
        assert!(serde_json::from_str::<TriggerConfig>("\"press\"").is_err());
    }
}
