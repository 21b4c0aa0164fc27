//! Alert service coordinating evaluators, the cooldown gate and the alert list
//!
//! Each check runs the typhoon, climate and tide evaluators as independent
//! tasks, waits for all of them, then applies the shared cooldown gate and
//! appends survivors to the active list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinError;
use uuid::Uuid;

use shared::{
    evaluate_climate, evaluate_high_tide, evaluate_typhoons, has_location_fix,
    validate_thresholds, AlertKind, AlertRecord, AlertThresholds, CooldownGate,
};

use crate::config::Config;
use crate::error::{MonitorError, MonitorResult};
use crate::services::notification::AlertSink;
use crate::snapshot::PollSnapshot;

/// Alert service for typhoon, climate anomaly and high tide alerts
pub struct AlertService {
    thresholds: RwLock<AlertThresholds>,
    typhoon_batch_limit: usize,
    gate: Arc<CooldownGate>,
    sink: Arc<dyn AlertSink>,
    active_alerts: Mutex<Vec<AlertRecord>>,
    monitoring: AtomicBool,
}

impl AlertService {
    pub fn new(
        thresholds: AlertThresholds,
        typhoon_batch_limit: usize,
        gate: Arc<CooldownGate>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            thresholds: RwLock::new(thresholds),
            typhoon_batch_limit,
            gate,
            sink,
            active_alerts: Mutex::new(Vec::new()),
            monitoring: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &Config, gate: Arc<CooldownGate>, sink: Arc<dyn AlertSink>) -> Self {
        Self::new(
            config.thresholds,
            config.monitor.typhoon_batch_limit,
            gate,
            sink,
        )
    }

    // ========================================================================
    // Monitoring lifecycle
    // ========================================================================

    pub fn start_monitoring(&self) {
        self.monitoring.store(true, Ordering::SeqCst);
        tracing::info!("Alert monitoring started");
    }

    pub fn stop_monitoring(&self) {
        self.monitoring.store(false, Ordering::SeqCst);
        tracing::info!("Alert monitoring stopped");
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Thresholds
    // ========================================================================

    pub async fn thresholds(&self) -> AlertThresholds {
        *self.thresholds.read().await
    }

    /// Replace the thresholds; invalid values are rejected and the old ones kept
    pub async fn update_thresholds(&self, thresholds: AlertThresholds) -> MonitorResult<()> {
        validate_thresholds(&thresholds)?;
        *self.thresholds.write().await = thresholds;
        tracing::info!(?thresholds, "Alert thresholds updated");
        Ok(())
    }

    // ========================================================================
    // Checks
    // ========================================================================

    /// Evaluate one poll snapshot and return the alerts that passed the gate.
    ///
    /// `now` is the device-local time; tide times are read on its calendar date.
    pub async fn check_all(
        &self,
        snapshot: &PollSnapshot,
        now: DateTime<FixedOffset>,
    ) -> MonitorResult<Vec<AlertRecord>> {
        if !self.is_monitoring() {
            return Err(MonitorError::MonitoringStopped);
        }

        let thresholds = self.thresholds().await;
        let at = now.with_timezone(&Utc);

        let location = snapshot.location;
        let tracks = snapshot.typhoons.clone();
        let batch_limit = self.typhoon_batch_limit;
        let typhoon_task = tokio::spawn(async move {
            if !has_location_fix(&location) {
                tracing::debug!("No location fix, skipping typhoon check");
                return Vec::new();
            }
            evaluate_typhoons(&location, &tracks, batch_limit, at)
        });

        let weather = snapshot.weather.clone();
        let climate_task = tokio::spawn(async move {
            weather
                .and_then(|reading| evaluate_climate(&reading, &thresholds, at))
                .into_iter()
                .collect::<Vec<_>>()
        });

        let tides = snapshot.tides.clone();
        let tide_task = tokio::spawn(async move {
            evaluate_high_tide(&tides, &now, thresholds.tide_alert_horizon_hours)
                .into_iter()
                .collect::<Vec<_>>()
        });

        let (typhoon, climate, tide) = tokio::join!(typhoon_task, climate_task, tide_task);

        let mut emitted = Vec::new();
        for (kind, outcome) in [
            (AlertKind::Typhoon, typhoon),
            (AlertKind::ClimateAnomaly, climate),
            (AlertKind::HighTide, tide),
        ] {
            emitted.extend(self.admit(kind, outcome, at));
        }

        let mut active = self.active_alerts.lock().await;
        for alert in &emitted {
            tracing::info!(alert_id = %alert.id, kind = %alert.kind, "Alert raised: {}", alert.title);
            active.push(alert.clone());
            self.sink.deliver(alert);
        }

        Ok(emitted)
    }

    /// Apply the cooldown gate to one kind's candidates. All candidates of a
    /// kind from the same check pass or fail together.
    fn admit(
        &self,
        kind: AlertKind,
        outcome: Result<Vec<AlertRecord>, JoinError>,
        at: DateTime<Utc>,
    ) -> Vec<AlertRecord> {
        let candidates = match outcome {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(%kind, "Evaluation task failed: {}", e);
                return Vec::new();
            }
        };

        if candidates.is_empty() {
            tracing::debug!(%kind, "No alert");
            return Vec::new();
        }

        if !self.gate.try_fire(kind, at) {
            tracing::debug!(%kind, suppressed = candidates.len(), "Alert suppressed by cooldown");
            return Vec::new();
        }

        candidates
    }

    // ========================================================================
    // Alert list
    // ========================================================================

    pub async fn active_alerts(&self) -> Vec<AlertRecord> {
        self.active_alerts.lock().await.clone()
    }

    /// Remove one alert from the active list. Returns false if it was not there.
    pub async fn dismiss(&self, alert_id: Uuid) -> bool {
        let mut active = self.active_alerts.lock().await;
        let before = active.len();
        active.retain(|alert| alert.id != alert_id);
        active.len() != before
    }

    /// Clear every cooldown so the next check may alert immediately
    pub fn reset_cooldowns(&self) {
        self.gate.reset();
        tracing::info!("Alert cooldowns reset");
    }
}
