//! Wearer vital-sign models and classification

use serde::{Deserialize, Serialize};

use crate::types::lenient_f64;

/// Latest vital-sign samples from the watch sensors
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VitalsReading {
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub heart_rate_bpm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub systolic_mmhg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub diastolic_mmhg: Option<f64>,
}

/// Heart-rate zone. Bands are closed-open; a boundary value belongs to the higher band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateZone {
    /// < 40 bpm
    DangerLow,
    /// 40-59 bpm
    Low,
    /// 60-119 bpm
    Normal,
    /// 120-149 bpm
    High,
    /// 150+ bpm
    DangerHigh,
}

impl HeartRateZone {
    pub fn is_danger(&self) -> bool {
        matches!(self, HeartRateZone::DangerLow | HeartRateZone::DangerHigh)
    }

    pub fn alert_level(&self) -> HealthAlertLevel {
        match self {
            HeartRateZone::DangerLow | HeartRateZone::DangerHigh => HealthAlertLevel::Danger,
            HeartRateZone::Low => HealthAlertLevel::Low,
            HeartRateZone::Normal => HealthAlertLevel::Normal,
            HeartRateZone::High => HealthAlertLevel::High,
        }
    }

    /// Reason passed along with an emergency call
    pub fn emergency_reason(&self) -> Option<&'static str> {
        match self {
            HeartRateZone::DangerLow => Some("Low heart rate"),
            HeartRateZone::DangerHigh => Some("High heart rate"),
            _ => None,
        }
    }
}

/// Upper (exclusive) bound of each zone, lowest first
const HEART_RATE_BANDS: [(f64, HeartRateZone); 4] = [
    (40.0, HeartRateZone::DangerLow),
    (60.0, HeartRateZone::Low),
    (120.0, HeartRateZone::Normal),
    (150.0, HeartRateZone::High),
];

/// Classify a heart rate in beats per minute
pub fn classify_heart_rate(bpm: f64) -> HeartRateZone {
    HEART_RATE_BANDS
        .iter()
        .find(|(upper, _)| bpm < *upper)
        .map(|(_, zone)| *zone)
        .unwrap_or(HeartRateZone::DangerHigh)
}

/// Blood-pressure category (American Heart Association style bands)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Danger,
    High,
    Elevated,
    Low,
    Normal,
}

impl BloodPressureCategory {
    pub fn alert_level(&self) -> HealthAlertLevel {
        match self {
            BloodPressureCategory::Danger => HealthAlertLevel::Danger,
            BloodPressureCategory::High | BloodPressureCategory::Elevated => HealthAlertLevel::High,
            BloodPressureCategory::Low => HealthAlertLevel::Low,
            BloodPressureCategory::Normal => HealthAlertLevel::Normal,
        }
    }

    pub fn emergency_reason(&self) -> Option<&'static str> {
        match self {
            BloodPressureCategory::Danger => Some("High blood pressure crisis"),
            _ => None,
        }
    }
}

type BloodPressureRule = (BloodPressureCategory, fn(f64, f64) -> bool);

fn is_crisis(systolic: f64, diastolic: f64) -> bool {
    systolic >= 180.0 || diastolic >= 120.0
}

fn is_high(systolic: f64, diastolic: f64) -> bool {
    systolic >= 140.0 || diastolic >= 90.0
}

fn is_elevated(systolic: f64, diastolic: f64) -> bool {
    systolic >= 130.0 || diastolic >= 80.0
}

fn is_low(systolic: f64, diastolic: f64) -> bool {
    systolic <= 90.0 || diastolic <= 60.0
}

/// Evaluated in order, first match wins. Earlier rules shadow the upper
/// bounds of later ones, so a reading in several bands takes the most severe.
const BLOOD_PRESSURE_RULES: [BloodPressureRule; 4] = [
    (BloodPressureCategory::Danger, is_crisis),
    (BloodPressureCategory::High, is_high),
    (BloodPressureCategory::Elevated, is_elevated),
    (BloodPressureCategory::Low, is_low),
];

/// Classify a systolic/diastolic pair in mmHg
pub fn classify_blood_pressure(systolic: f64, diastolic: f64) -> BloodPressureCategory {
    BLOOD_PRESSURE_RULES
        .iter()
        .find(|(_, rule)| rule(systolic, diastolic))
        .map(|(category, _)| *category)
        .unwrap_or(BloodPressureCategory::Normal)
}

/// Coarse level shown on the health card
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthAlertLevel {
    Low,
    High,
    Normal,
    Danger,
}

/// Human-readable assessment of one vital sign
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthAlert {
    pub level: HealthAlertLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_reason: Option<String>,
}

/// Assess a heart-rate sample. Returns `None` for a missing reading
/// (non-finite or not positive).
pub fn assess_heart_rate(bpm: f64) -> Option<HealthAlert> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return None;
    }
    let zone = classify_heart_rate(bpm);
    let shown = bpm as i64;
    let message = match zone {
        HeartRateZone::DangerLow => format!("DANGER: Heart rate too low ({} BPM)", shown),
        HeartRateZone::DangerHigh => format!("DANGER: Heart rate too high ({} BPM)", shown),
        HeartRateZone::Low => format!("Low heart rate ({} BPM)", shown),
        HeartRateZone::High => format!("High heart rate ({} BPM)", shown),
        HeartRateZone::Normal => format!("Normal heart rate ({} BPM)", shown),
    };
    Some(HealthAlert {
        level: zone.alert_level(),
        message,
        emergency_reason: zone.emergency_reason().map(str::to_string),
    })
}

/// Assess a blood-pressure pair. Both values must be finite and positive;
/// zero means the sensor has not reported yet.
pub fn assess_blood_pressure(systolic: f64, diastolic: f64) -> Option<HealthAlert> {
    let measured = |v: f64| v.is_finite() && v > 0.0;
    if !measured(systolic) || !measured(diastolic) {
        return None;
    }
    let category = classify_blood_pressure(systolic, diastolic);
    let pair = format!("{}/{}", systolic as i64, diastolic as i64);
    let message = match category {
        BloodPressureCategory::Danger => format!("DANGER: Blood pressure critically high ({})", pair),
        BloodPressureCategory::High => format!("High blood pressure ({})", pair),
        BloodPressureCategory::Elevated => format!("Elevated blood pressure ({})", pair),
        BloodPressureCategory::Low => format!("Low blood pressure ({})", pair),
        BloodPressureCategory::Normal => format!("Normal blood pressure ({})", pair),
    };
    Some(HealthAlert {
        level: category.alert_level(),
        message,
        emergency_reason: category.emergency_reason().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heart_rate_boundaries() {
        assert_eq!(classify_heart_rate(39.0), HeartRateZone::DangerLow);
        assert_eq!(classify_heart_rate(39.9), HeartRateZone::DangerLow);
        assert_eq!(classify_heart_rate(40.0), HeartRateZone::Low);
        assert_eq!(classify_heart_rate(59.9), HeartRateZone::Low);
        assert_eq!(classify_heart_rate(60.0), HeartRateZone::Normal);
        assert_eq!(classify_heart_rate(119.0), HeartRateZone::Normal);
        assert_eq!(classify_heart_rate(120.0), HeartRateZone::High);
        assert_eq!(classify_heart_rate(149.9), HeartRateZone::High);
        assert_eq!(classify_heart_rate(150.0), HeartRateZone::DangerHigh);
        assert_eq!(classify_heart_rate(220.0), HeartRateZone::DangerHigh);
    }

    #[test]
    fn test_blood_pressure_danger_on_either_value() {
        // Systolic alone
        assert_eq!(classify_blood_pressure(180.0, 70.0), BloodPressureCategory::Danger);
        // Diastolic alone
        assert_eq!(classify_blood_pressure(100.0, 125.0), BloodPressureCategory::Danger);
    }

    #[test]
    fn test_blood_pressure_bands() {
        assert_eq!(classify_blood_pressure(179.0, 70.0), BloodPressureCategory::High);
        assert_eq!(classify_blood_pressure(120.0, 90.0), BloodPressureCategory::High);
        assert_eq!(classify_blood_pressure(135.0, 75.0), BloodPressureCategory::Elevated);
        assert_eq!(classify_blood_pressure(120.0, 85.0), BloodPressureCategory::Elevated);
        assert_eq!(classify_blood_pressure(90.0, 70.0), BloodPressureCategory::Low);
        assert_eq!(classify_blood_pressure(110.0, 60.0), BloodPressureCategory::Low);
        assert_eq!(classify_blood_pressure(118.0, 76.0), BloodPressureCategory::Normal);
    }

    #[test]
    fn test_blood_pressure_most_severe_wins() {
        // Low systolic but high diastolic
        assert_eq!(classify_blood_pressure(85.0, 95.0), BloodPressureCategory::High);
        // Low diastolic but elevated systolic
        assert_eq!(classify_blood_pressure(132.0, 55.0), BloodPressureCategory::Elevated);
    }

    #[test]
    fn test_assess_heart_rate_messages() {
        let alert = assess_heart_rate(35.0).unwrap();
        assert_eq!(alert.level, HealthAlertLevel::Danger);
        assert_eq!(alert.message, "DANGER: Heart rate too low (35 BPM)");
        assert_eq!(alert.emergency_reason.as_deref(), Some("Low heart rate"));

        let alert = assess_heart_rate(80.4).unwrap();
        assert_eq!(alert.level, HealthAlertLevel::Normal);
        assert_eq!(alert.message, "Normal heart rate (80 BPM)");
        assert!(alert.emergency_reason.is_none());
    }

    #[test]
    fn test_assess_heart_rate_missing() {
        assert!(assess_heart_rate(0.0).is_none());
        assert!(assess_heart_rate(-5.0).is_none());
        assert!(assess_heart_rate(f64::NAN).is_none());
    }

    #[test]
    fn test_assess_blood_pressure_messages() {
        let alert = assess_blood_pressure(185.0, 95.0).unwrap();
        assert_eq!(alert.level, HealthAlertLevel::Danger);
        assert_eq!(alert.message, "DANGER: Blood pressure critically high (185/95)");

        let alert = assess_blood_pressure(132.0, 78.0).unwrap();
        assert_eq!(alert.level, HealthAlertLevel::High);
        assert_eq!(alert.message, "Elevated blood pressure (132/78)");
    }

    #[test]
    fn test_assess_blood_pressure_requires_both_values() {
        assert!(assess_blood_pressure(120.0, 0.0).is_none());
        assert!(assess_blood_pressure(0.0, 80.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_heart_rate_monotonic(a in 1.0f64..250.0, b in 1.0f64..250.0) {
            let rank = |z: HeartRateZone| match z {
                HeartRateZone::DangerLow => 0,
                HeartRateZone::Low => 1,
                HeartRateZone::Normal => 2,
                HeartRateZone::High => 3,
                HeartRateZone::DangerHigh => 4,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(classify_heart_rate(lo)) <= rank(classify_heart_rate(hi)));
        }

        #[test]
        fn prop_classifiers_idempotent(bpm in 0.0f64..250.0, sys in 50.0f64..250.0, dia in 30.0f64..150.0) {
            prop_assert_eq!(classify_heart_rate(bpm), classify_heart_rate(bpm));
            prop_assert_eq!(classify_blood_pressure(sys, dia), classify_blood_pressure(sys, dia));
        }

        #[test]
        fn prop_crisis_always_danger(sys in 180.0f64..300.0, dia in 30.0f64..150.0) {
            prop_assert_eq!(classify_blood_pressure(sys, dia), BloodPressureCategory::Danger);
        }
    }
}
