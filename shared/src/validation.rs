//! Validation utilities for configuration and sensor input

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::AlertThresholds;
use crate::types::Coordinate;

#[derive(Debug, Error)]
pub enum ThresholdError {
    #[error("invalid alert thresholds: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Validate a thresholds configuration.
///
/// Rejects negative limits, non-finite values, a non-positive tide horizon
/// and a temperature band whose minimum is not below its maximum.
pub fn validate_thresholds(thresholds: &AlertThresholds) -> Result<(), ThresholdError> {
    thresholds.validate()?;
    Ok(())
}

/// Validate that a coordinate is on the globe
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&coordinate.latitude) {
        return Err("Latitude must be between -90 and 90 degrees");
    }
    if !(-180.0..=180.0).contains(&coordinate.longitude) {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}

/// Watch apps report 0,0 until the first location fix arrives
pub fn has_location_fix(coordinate: &Coordinate) -> bool {
    validate_coordinate(coordinate).is_ok()
        && !(coordinate.latitude == 0.0 && coordinate.longitude == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_valid() {
        assert!(validate_thresholds(&AlertThresholds::default()).is_ok());
    }

    #[test]
    fn test_inverted_temperature_band_rejected() {
        let thresholds = AlertThresholds {
            temperature_min_c: 30.0,
            temperature_max_c: 10.0,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&thresholds).is_err());

        let equal = AlertThresholds {
            temperature_min_c: 20.0,
            temperature_max_c: 20.0,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&equal).is_err());
    }

    #[test]
    fn test_negative_limits_rejected() {
        let wind = AlertThresholds {
            wind_speed_max_ms: -1.0,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&wind).is_err());

        let waves = AlertThresholds {
            wave_height_max_m: -0.5,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&waves).is_err());
    }

    #[test]
    fn test_tide_horizon_rejected() {
        let zero = AlertThresholds {
            tide_alert_horizon_hours: 0.0,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&zero).is_err());

        let too_long = AlertThresholds {
            tide_alert_horizon_hours: 30.0,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&too_long).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let thresholds = AlertThresholds {
            temperature_max_c: f64::INFINITY,
            ..AlertThresholds::default()
        };
        assert!(validate_thresholds(&thresholds).is_err());
    }

    #[test]
    fn test_validate_coordinate() {
        assert!(validate_coordinate(&Coordinate::new(35.1796, 129.0756)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(-90.0, 180.0)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(91.0, 0.0)).is_err());
        assert!(validate_coordinate(&Coordinate::new(0.0, -181.0)).is_err());
        assert!(validate_coordinate(&Coordinate::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_location_fix() {
        assert!(has_location_fix(&Coordinate::new(35.1796, 129.0756)));
        assert!(!has_location_fix(&Coordinate::new(0.0, 0.0)));
    }
}
