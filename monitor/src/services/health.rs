//! Vital-sign assessment with latched emergency escalation

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use shared::{assess_blood_pressure, assess_heart_rate, HealthAlert, VitalsReading};

use crate::config::Config;
use crate::services::emergency::{EmergencyRequest, EmergencyService};

/// Outcome of assessing one vitals sample
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HealthAssessment {
    pub heart_rate: Option<HealthAlert>,
    pub blood_pressure: Option<HealthAlert>,
    pub emergency: Option<EmergencyRequest>,
}

/// Classifies vitals and requests an emergency call on danger readings.
///
/// Escalation is latched: after one request, further danger readings do not
/// request another call until the latch window has passed.
#[derive(Debug)]
pub struct HealthService {
    emergency: EmergencyService,
    latch: Duration,
    last_escalation: Mutex<Option<DateTime<Utc>>>,
}

impl HealthService {
    pub fn new(emergency: EmergencyService, latch: Duration) -> Self {
        Self {
            emergency,
            latch,
            last_escalation: Mutex::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            EmergencyService::new(config.monitor.emergency_number.clone()),
            Duration::seconds(config.cooldown.emergency_secs),
        )
    }

    /// Assess the latest heart-rate and blood-pressure samples
    pub fn assess(&self, vitals: &VitalsReading, now: DateTime<Utc>) -> HealthAssessment {
        let heart_rate = vitals.heart_rate_bpm.and_then(assess_heart_rate);
        let blood_pressure = match (vitals.systolic_mmhg, vitals.diastolic_mmhg) {
            (Some(systolic), Some(diastolic)) => assess_blood_pressure(systolic, diastolic),
            _ => None,
        };

        if heart_rate.is_none() && blood_pressure.is_none() {
            tracing::debug!("No usable vitals in sample");
        }

        let emergency = [&heart_rate, &blood_pressure]
            .into_iter()
            .flatten()
            .filter_map(|alert| alert.emergency_reason.as_deref())
            .find_map(|reason| self.escalate(reason, now));

        HealthAssessment {
            heart_rate,
            blood_pressure,
            emergency,
        }
    }

    /// Request an emergency call unless one was requested within the latch window
    pub fn escalate(&self, reason: &str, now: DateTime<Utc>) -> Option<EmergencyRequest> {
        let mut last = self.lock();
        if let Some(previous) = *last {
            if now.signed_duration_since(previous) < self.latch {
                tracing::debug!(reason, "Emergency escalation latched");
                return None;
            }
        }
        *last = Some(now);
        Some(self.emergency.request(reason, now))
    }

    /// Assess a synthetic heart rate, bypassing the latch
    pub fn simulate_heart_rate(&self, bpm: f64, now: DateTime<Utc>) -> HealthAssessment {
        self.reset();
        self.assess(
            &VitalsReading {
                heart_rate_bpm: Some(bpm),
                ..VitalsReading::default()
            },
            now,
        )
    }

    /// Assess a synthetic blood-pressure pair, bypassing the latch
    pub fn simulate_blood_pressure(
        &self,
        systolic: f64,
        diastolic: f64,
        now: DateTime<Utc>,
    ) -> HealthAssessment {
        self.reset();
        self.assess(
            &VitalsReading {
                systolic_mmhg: Some(systolic),
                diastolic_mmhg: Some(diastolic),
                ..VitalsReading::default()
            },
            now,
        )
    }

    /// Clear the escalation latch (monitoring stopped or test trigger)
    pub fn reset(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<DateTime<Utc>>> {
        self.last_escalation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new(EmergencyService::default(), Duration::seconds(60))
    }
}
