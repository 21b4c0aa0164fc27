//! Weather reading models

use serde::{Deserialize, Serialize};

use crate::types::lenient_f64;

/// Marine weather observation for the wearer's location, produced once per poll.
///
/// Every field is optional: upstream feeds send numbers as strings and
/// occasionally send placeholders, which decode to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub temperature_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub wind_speed_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub wave_height_m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub humidity_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub rain_mm: Option<f64>,
}

impl WeatherReading {
    pub fn new(temperature_c: f64, wind_speed_ms: f64, wave_height_m: f64) -> Self {
        Self {
            temperature_c: Some(temperature_c),
            wind_speed_ms: Some(wind_speed_ms),
            wave_height_m: Some(wave_height_m),
            humidity_pct: None,
            rain_mm: None,
        }
    }
}
