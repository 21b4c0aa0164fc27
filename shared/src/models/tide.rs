//! Tide event models

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tide state inferred from the bounding events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TidePhase {
    High,
    Low,
}

impl TidePhase {
    pub fn from_high_flag(is_high_tide: bool) -> Self {
        if is_high_tide {
            TidePhase::High
        } else {
            TidePhase::Low
        }
    }
}

impl std::fmt::Display for TidePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TidePhase::High => write!(f, "High tide"),
            TidePhase::Low => write!(f, "Low tide"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid tide time '{0}', expected HH:MM")]
pub struct TideParseError(pub String);

/// One high or low water event of the day, in device-local time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TideEvent {
    /// "HH:MM"
    pub local_time: String,
    pub is_high_tide: bool,
    #[serde(default)]
    pub height_label: Option<String>,
}

impl TideEvent {
    pub fn new(local_time: impl Into<String>, is_high_tide: bool) -> Self {
        Self {
            local_time: local_time.into(),
            is_high_tide,
            height_label: None,
        }
    }

    /// Build an event from the tide feed's `"HH:MM (height) arrow"` format.
    ///
    /// The first whitespace-separated token is the time and the second, if
    /// present, the height label.
    pub fn from_raw(raw: &str, is_high_tide: bool) -> Self {
        let mut parts = raw.split_whitespace();
        let local_time = parts.next().unwrap_or("--:--").to_string();
        let height_label = parts.next().map(str::to_string);
        Self {
            local_time,
            is_high_tide,
            height_label,
        }
    }

    pub fn phase(&self) -> TidePhase {
        TidePhase::from_high_flag(self.is_high_tide)
    }

    pub fn time_of_day(&self) -> Result<NaiveTime, TideParseError> {
        NaiveTime::parse_from_str(self.local_time.trim(), "%H:%M")
            .map_err(|_| TideParseError(self.local_time.clone()))
    }
}
