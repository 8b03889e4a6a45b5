//! Table geometry and match tuning
//!
//! Loaded from a JSON level file; every field has a default so partial
//! files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Table bounds and pocket layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub top_y: f32,
    pub bottom_y: f32,
    pub left_x: f32,
    pub right_x: f32,
    /// Width of each corner pocket zone, measured along the rail
    pub corner_pocket_width: f32,
    /// Middle pocket zone on the top and bottom rails
    pub middle_pocket_start: f32,
    pub middle_pocket_end: f32,
    /// Also pocket balls at the corner zones of the left/right rails.
    /// Off by default: the original table only pockets on top/bottom.
    pub side_rail_pockets: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            top_y: TABLE_TOP_Y,
            bottom_y: TABLE_BOTTOM_Y,
            left_x: TABLE_LEFT_X,
            right_x: TABLE_RIGHT_X,
            corner_pocket_width: CORNER_POCKET_WIDTH,
            middle_pocket_start: MIDDLE_POCKET_START,
            middle_pocket_end: MIDDLE_POCKET_END,
            side_rail_pockets: false,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub table: TableSettings,

    // === Countdown ===
    /// Seconds on the clock when the timer starts
    pub round_seconds: u32,
    /// Seconds removed per timer pulse
    pub timer_step: u32,

    // === Cue ===
    pub max_power: f32,
    pub power_step: f32,

    // === Rules ===
    /// Return pocketed object balls to their rack spot once the table settles
    pub respot_object_balls: bool,

    /// Seed for the autoplay bot
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table: TableSettings::default(),
            round_seconds: ROUND_SECONDS,
            timer_step: TIMER_STEP,
            max_power: MAX_POWER,
            power_step: POWER_STEP,
            respot_object_balls: true,
            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check values that serde cannot. Table geometry is checked again by
    /// `Table::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::Invalid("round_seconds must be > 0".into()));
        }
        if self.timer_step == 0 {
            return Err(ConfigError::Invalid("timer_step must be > 0".into()));
        }
        if !(self.max_power.is_finite() && self.max_power > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_power must be positive, got {}",
                self.max_power
            )));
        }
        if !(self.power_step.is_finite() && self.power_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "power_step must be positive, got {}",
                self.power_step
            )));
        }
        crate::sim::Table::from_settings(&self.table).map(|_| ())
    }
}
