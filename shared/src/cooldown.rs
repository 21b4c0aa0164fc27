//! Per-kind alert rate limiting

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::models::AlertKind;

/// Default suppression window after an alert fires
pub const DEFAULT_ALERT_COOLDOWN_SECS: i64 = 3600;

/// Suppresses repeat alerts of the same kind within a time window.
///
/// Every kind has an independent window. The map sits behind a single
/// mutex, so `try_fire` is an atomic check-then-record and the gate can be
/// shared (`Arc<CooldownGate>`) between concurrently completing evaluations.
#[derive(Debug)]
pub struct CooldownGate {
    cooldown: Duration,
    last_fired: Mutex<HashMap<AlertKind, DateTime<Utc>>>,
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_ALERT_COOLDOWN_SECS))
    }
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: Mutex::new(HashMap::new()),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether `kind` fired less than one window before `now`
    pub fn is_in_cooldown(&self, kind: AlertKind, now: DateTime<Utc>) -> bool {
        let last_fired = self.lock();
        Self::suppressed(&last_fired, kind, now, self.cooldown)
    }

    /// Record `now` for `kind` and return true, unless `kind` is still cooling down.
    pub fn try_fire(&self, kind: AlertKind, now: DateTime<Utc>) -> bool {
        let mut last_fired = self.lock();
        if Self::suppressed(&last_fired, kind, now, self.cooldown) {
            return false;
        }
        last_fired.insert(kind, now);
        true
    }

    /// Last time `kind` passed the gate
    pub fn last_fired(&self, kind: AlertKind) -> Option<DateTime<Utc>> {
        self.lock().get(&kind).copied()
    }

    /// Forget every recorded emission (manual test triggers)
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn suppressed(
        last_fired: &HashMap<AlertKind, DateTime<Utc>>,
        kind: AlertKind,
        now: DateTime<Utc>,
        cooldown: Duration,
    ) -> bool {
        last_fired
            .get(&kind)
            .map(|last| now.signed_duration_since(*last) < cooldown)
            .unwrap_or(false)
    }

    // A panic while holding the lock cannot leave the map half-written
    fn lock(&self) -> MutexGuard<'_, HashMap<AlertKind, DateTime<Utc>>> {
        self.last_fired.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
