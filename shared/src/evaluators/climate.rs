//! Climate anomaly classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AlertKind, AlertRecord, AlertThresholds, WeatherReading};

pub const CLIMATE_ANOMALY_TITLE: &str = "⚠ Climate Anomaly ⚠";

/// Direction of a reading relative to its configured band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    High,
    Normal,
}

/// Result of classifying one reading. `reason` is set for every non-normal result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateCheck {
    pub severity: Severity,
    pub reason: Option<String>,
}

impl ClimateCheck {
    fn normal() -> Self {
        Self {
            severity: Severity::Normal,
            reason: None,
        }
    }

    fn anomaly(severity: Severity, reason: String) -> Self {
        Self {
            severity,
            reason: Some(reason),
        }
    }

    pub fn is_anomaly(&self) -> bool {
        self.severity != Severity::Normal
    }
}

pub fn classify_temperature(temperature_c: f64, thresholds: &AlertThresholds) -> ClimateCheck {
    if temperature_c < thresholds.temperature_min_c {
        ClimateCheck::anomaly(Severity::Low, format!("Low temp: {:.1}°C", temperature_c))
    } else if temperature_c > thresholds.temperature_max_c {
        ClimateCheck::anomaly(Severity::High, format!("High temp: {:.1}°C", temperature_c))
    } else {
        ClimateCheck::normal()
    }
}

pub fn classify_wind(wind_speed_ms: f64, thresholds: &AlertThresholds) -> ClimateCheck {
    if wind_speed_ms > thresholds.wind_speed_max_ms {
        ClimateCheck::anomaly(Severity::High, format!("High wind: {:.1}m/s", wind_speed_ms))
    } else {
        ClimateCheck::normal()
    }
}

pub fn classify_wave_height(wave_height_m: f64, thresholds: &AlertThresholds) -> ClimateCheck {
    if wave_height_m > thresholds.wave_height_max_m {
        ClimateCheck::anomaly(Severity::High, format!("High waves: {:.1}m", wave_height_m))
    } else {
        ClimateCheck::normal()
    }
}

/// Reasons for every anomalous field, in temperature, wind, wave order.
/// Missing fields are skipped.
pub fn climate_anomaly_reasons(reading: &WeatherReading, thresholds: &AlertThresholds) -> Vec<String> {
    let checks = [
        reading.temperature_c.map(|t| classify_temperature(t, thresholds)),
        reading.wind_speed_ms.map(|w| classify_wind(w, thresholds)),
        reading.wave_height_m.map(|h| classify_wave_height(h, thresholds)),
    ];

    checks
        .into_iter()
        .flatten()
        .filter_map(|check| check.reason)
        .collect()
}

/// One climate anomaly alert listing every anomalous reading, or `None`
pub fn evaluate_climate(
    reading: &WeatherReading,
    thresholds: &AlertThresholds,
    at: DateTime<Utc>,
) -> Option<AlertRecord> {
    let reasons = climate_anomaly_reasons(reading, thresholds);
    if reasons.is_empty() {
        return None;
    }
    Some(AlertRecord::new(
        AlertKind::ClimateAnomaly,
        CLIMATE_ANOMALY_TITLE,
        reasons.join(", "),
        at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 21, 3, 0, 0).unwrap()
    }

    #[test]
    fn test_classify_temperature() {
        let t = AlertThresholds::default();
        let low = classify_temperature(4.0, &t);
        assert_eq!(low.severity, Severity::Low);
        assert_eq!(low.reason.as_deref(), Some("Low temp: 4.0°C"));

        let high = classify_temperature(36.5, &t);
        assert_eq!(high.severity, Severity::High);
        assert_eq!(high.reason.as_deref(), Some("High temp: 36.5°C"));

        // Bounds are inclusive of normal
        assert_eq!(classify_temperature(5.0, &t), ClimateCheck::normal());
        assert_eq!(classify_temperature(35.0, &t), ClimateCheck::normal());
    }

    #[test]
    fn test_classify_wind_and_waves() {
        let t = AlertThresholds::default();
        assert!(!classify_wind(15.0, &t).is_anomaly());
        assert_eq!(
            classify_wind(15.1, &t).reason.as_deref(),
            Some("High wind: 15.1m/s")
        );
        assert!(!classify_wave_height(3.0, &t).is_anomaly());
        assert_eq!(
            classify_wave_height(4.2, &t).reason.as_deref(),
            Some("High waves: 4.2m")
        );
    }

    #[test]
    fn test_evaluate_climate_joins_reasons() {
        let reading = WeatherReading::new(38.0, 18.0, 3.5);
        let alert = evaluate_climate(&reading, &AlertThresholds::default(), at()).unwrap();
        assert_eq!(alert.kind, AlertKind::ClimateAnomaly);
        assert_eq!(alert.title, CLIMATE_ANOMALY_TITLE);
        assert_eq!(
            alert.message,
            "High temp: 38.0°C, High wind: 18.0m/s, High waves: 3.5m"
        );
        assert_eq!(alert.created_at, at());
    }

    #[test]
    fn test_evaluate_climate_normal_conditions() {
        let reading = WeatherReading::new(22.0, 4.0, 0.5);
        assert!(evaluate_climate(&reading, &AlertThresholds::default(), at()).is_none());
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let reading = WeatherReading {
            wave_height_m: Some(5.0),
            ..WeatherReading::default()
        };
        let alert = evaluate_climate(&reading, &AlertThresholds::default(), at()).unwrap();
        assert_eq!(alert.message, "High waves: 5.0m");

        assert!(evaluate_climate(&WeatherReading::default(), &AlertThresholds::default(), at()).is_none());
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = AlertThresholds {
            wind_speed_max_ms: 8.0,
            ..AlertThresholds::default()
        };
        let reading = WeatherReading::new(20.0, 10.0, 1.0);
        let reasons = climate_anomaly_reasons(&reading, &thresholds);
        assert_eq!(reasons, vec!["High wind: 10.0m/s".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_climate_reasons_idempotent(
            temp in -10.0f64..50.0,
            wind in 0.0f64..40.0,
            wave in 0.0f64..10.0,
        ) {
            let reading = WeatherReading::new(temp, wind, wave);
            let thresholds = AlertThresholds::default();
            let first = climate_anomaly_reasons(&reading, &thresholds);
            let second = climate_anomaly_reasons(&reading, &thresholds);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.len() <= 3);
        }
    }
}
