//! Typhoon forecast models

use serde::{Deserialize, Serialize};

use crate::types::{lenient_f64, sequence_number, Coordinate};

/// One forecast position of a typhoon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TyphoonForecastPoint {
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub longitude: Option<f64>,
    /// Maximum sustained wind (m/s)
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub wind_speed_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub central_pressure_hpa: Option<f64>,
    #[serde(default)]
    pub location_label: String,
}

impl TyphoonForecastPoint {
    /// Position, if both coordinates are present
    pub fn position(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

/// All forecast points of one announced typhoon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TyphoonTrack {
    /// Typhoon number of the season; feeds send it as a number or a numeric string
    #[serde(deserialize_with = "sequence_number::deserialize")]
    pub sequence_id: u32,
    /// Announcement time as `yyyyMMddHHmm`; orders tracks lexicographically
    pub announced_at: String,
    /// Latest forecast first
    #[serde(default)]
    pub forecasts: Vec<TyphoonForecastPoint>,
}

/// Severity tier of a typhoon proximity alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TyphoonTier {
    /// Within 1000 km, wind ≥ 15 m/s
    Monitoring,
    /// Within 600 km, wind ≥ 20 m/s
    WatchUpgraded,
    /// Within 400 km, wind ≥ 25 m/s
    Warning,
}

impl TyphoonTier {
    pub fn title(&self) -> &'static str {
        match self {
            TyphoonTier::Warning => "⚠ TYPHOON WARNING ⚠",
            TyphoonTier::WatchUpgraded => "⚠ TYPHOON WATCH ⚠",
            TyphoonTier::Monitoring => "⚠ TYPHOON INFO ⚠",
        }
    }
}

impl std::fmt::Display for TyphoonTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TyphoonTier::Warning => write!(f, "Warning"),
            TyphoonTier::WatchUpgraded => write!(f, "Watch"),
            TyphoonTier::Monitoring => write!(f, "Monitoring"),
        }
    }
}
