//! User-adjustable alert thresholds

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Limits used by the climate and tide evaluators.
///
/// Persisted outside the core and read-only to it. Defaults match the
/// watch app's factory settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_temperature_bounds"))]
#[serde(default)]
pub struct AlertThresholds {
    /// Wind speed above which conditions are anomalous (m/s)
    #[validate(range(min = 0.0))]
    pub wind_speed_max_ms: f64,
    /// Lower temperature bound (°C)
    pub temperature_min_c: f64,
    /// Upper temperature bound (°C)
    pub temperature_max_c: f64,
    /// Wave height above which conditions are anomalous (m)
    #[validate(range(min = 0.0))]
    pub wave_height_max_m: f64,
    /// How far ahead an upcoming high tide raises a warning (hours)
    #[validate(range(min = 0.0, max = 24.0))]
    pub tide_alert_horizon_hours: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            wind_speed_max_ms: 15.0,
            temperature_min_c: 5.0,
            temperature_max_c: 35.0,
            wave_height_max_m: 3.0,
            tide_alert_horizon_hours: 2.0,
        }
    }
}

fn validate_temperature_bounds(thresholds: &AlertThresholds) -> Result<(), ValidationError> {
    let all_finite = [
        thresholds.wind_speed_max_ms,
        thresholds.temperature_min_c,
        thresholds.temperature_max_c,
        thresholds.wave_height_max_m,
        thresholds.tide_alert_horizon_hours,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !all_finite {
        return Err(ValidationError::new("non_finite_threshold"));
    }
    if thresholds.temperature_min_c >= thresholds.temperature_max_c {
        return Err(ValidationError::new("temperature_bounds"));
    }
    if thresholds.tide_alert_horizon_hours <= 0.0 {
        return Err(ValidationError::new("tide_horizon"));
    }
    Ok(())
}
