// Settings module
// Layout and interaction tuning loaded from the host's settings file

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default coalescing window for pointer moves (one frame).
pub const DEFAULT_DEBOUNCE_MS: u64 = 16;
/// Edge delay used when paging fires once per proximity report.
pub const SIMPLE_EDGE_DELAY_MS: u64 = 500;
/// Edge delay used when paging keeps repeating while held.
pub const REPEATING_EDGE_DELAY_MS: u64 = 1200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("first_day_of_week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidFirstDayOfWeek(u8),
    #[error("debounce_ms must be greater than zero")]
    ZeroDebounce,
    #[error("edge_delay_ms must be greater than zero")]
    ZeroEdgeDelay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutSettings,
    pub interaction: InteractionSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.layout.validate()?;
        self.interaction.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u8,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }
        Ok(())
    }
}

/// How edge-of-grid paging behaves while a drag is held near an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeNavigationMode {
    /// Short delay, one page per hover.
    Simple,
    /// Longer delay; keeps paging while proximity reports keep arriving.
    #[default]
    Repeating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub debounce_ms: u64,
    pub edge_mode: EdgeNavigationMode,
    /// Overrides the mode's default edge delay.
    pub edge_delay_ms: Option<u64>,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            edge_mode: EdgeNavigationMode::default(),
            edge_delay_ms: None,
        }
    }
}

impl InteractionSettings {
    pub fn simple() -> Self {
        Self {
            edge_mode: EdgeNavigationMode::Simple,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.debounce_ms == 0 {
            return Err(SettingsError::ZeroDebounce);
        }
        if self.edge_delay_ms == Some(0) {
            return Err(SettingsError::ZeroEdgeDelay);
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn edge_delay(&self) -> Duration {
        let default_ms = match self.edge_mode {
            EdgeNavigationMode::Simple => SIMPLE_EDGE_DELAY_MS,
            EdgeNavigationMode::Repeating => REPEATING_EDGE_DELAY_MS,
        };
        Duration::from_millis(self.edge_delay_ms.unwrap_or(default_ms))
    }
}
