//! One poll's worth of already-decoded readings

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use shared::{Coordinate, TideEvent, TyphoonTrack, VitalsReading, WeatherReading};

use crate::error::MonitorResult;

/// Everything the poller gathered for one check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollSnapshot {
    pub location: Coordinate,
    #[serde(default)]
    pub weather: Option<WeatherReading>,
    /// Today's tide events in chronological order
    #[serde(default)]
    pub tides: Vec<TideEvent>,
    #[serde(default)]
    pub typhoons: Vec<TyphoonTrack>,
    #[serde(default)]
    pub vitals: Option<VitalsReading>,
    /// Device-local time of the poll; replays use it instead of the clock
    #[serde(default)]
    pub observed_at: Option<DateTime<FixedOffset>>,
}

impl PollSnapshot {
    pub fn new(location: Coordinate) -> Self {
        Self {
            location,
            weather: None,
            tides: Vec::new(),
            typhoons: Vec::new(),
            vitals: None,
            observed_at: None,
        }
    }

    pub fn from_json(json: &str) -> MonitorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
