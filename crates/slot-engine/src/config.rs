//! Layout configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```
//! use slot_engine::LayoutConfig;
//!
//! let config = LayoutConfig::from_json_str(r#"{ "weekStart": "monday", "gutterPx": 4 }"#).unwrap();
//! assert_eq!(config.gutter_px, 4.0);
//! assert_eq!(config.row_height_px, 64.0);
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::EventType;
use crate::normalize::NormalizeOptions;
use crate::week::{parse_timezone, WeekStartDay};

pub const DEFAULT_ROW_HEIGHT_PX: f64 = 64.0;
pub const DEFAULT_GUTTER_PX: f64 = 6.0;
pub const DEFAULT_MIN_BLOCK_HEIGHT_PX: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Height of one hour row; `24 * row_height_px` is the fallback day height.
    pub row_height_px: f64,
    /// Horizontal gap between adjacent columns, split across both sides.
    pub gutter_px: f64,
    /// Smallest rendered block height.
    pub min_block_height_px: f64,
    pub week_start: WeekStartDay,
    /// IANA zone of the week grid.
    pub timezone: String,
    pub visible_event_types: Vec<EventType>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
            gutter_px: DEFAULT_GUTTER_PX,
            min_block_height_px: DEFAULT_MIN_BLOCK_HEIGHT_PX,
            week_start: WeekStartDay::default(),
            timezone: "UTC".to_string(),
            visible_event_types: vec![EventType::Default],
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Config`] for malformed JSON or out-of-range sizes,
    /// and [`SlotError::InvalidTimezone`] for an unknown zone.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: LayoutConfig =
            serde_json::from_str(s).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("rowHeightPx", self.row_height_px)?;
        check_non_negative("gutterPx", self.gutter_px)?;
        check_non_negative("minBlockHeightPx", self.min_block_height_px)?;
        self.tz()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Day height used when the rendering surface cannot measure one.
    pub fn default_day_height_px(&self) -> f64 {
        self.row_height_px * 24.0
    }

    pub fn normalize_options(&self) -> Result<NormalizeOptions> {
        Ok(NormalizeOptions {
            display_tz: self.tz()?,
            visible_event_types: self.visible_event_types.clone(),
        })
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SlotError::Config(format!("{} must be positive, got {}", name, value)))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SlotError::Config(format!("{} must not be negative, got {}", name, value)))
    }
}
