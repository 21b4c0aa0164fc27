//! Emergency call requests and the triple-tap gesture

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::Config;

/// A request for the platform layer to dial emergency services
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmergencyRequest {
    pub reason: String,
    pub number: String,
    pub requested_at: DateTime<Utc>,
}

/// Builds emergency requests for a configured number
#[derive(Debug, Clone)]
pub struct EmergencyService {
    number: String,
}

impl EmergencyService {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn request(&self, reason: impl Into<String>, now: DateTime<Utc>) -> EmergencyRequest {
        let request = EmergencyRequest {
            reason: reason.into(),
            number: self.number.clone(),
            requested_at: now,
        };
        tracing::warn!(reason = %request.reason, number = %request.number, "Emergency call requested");
        request
    }

    /// Text of the confirmation prompt shown after the tap gesture
    pub fn prompt(&self) -> String {
        format!("Call {}?", self.number)
    }
}

impl Default for EmergencyService {
    fn default() -> Self {
        Self::new("112")
    }
}

/// Detects a rapid sequence of taps used to raise an emergency prompt.
///
/// Each tap must land within `window` of the previous one; a slower tap
/// starts a new sequence.
#[derive(Debug, Clone)]
pub struct TapGestureDetector {
    window: Duration,
    required_taps: u32,
    tap_count: u32,
    last_tap: Option<DateTime<Utc>>,
}

impl Default for TapGestureDetector {
    fn default() -> Self {
        Self::new(Duration::milliseconds(500), 3)
    }
}

impl TapGestureDetector {
    pub fn new(window: Duration, required_taps: u32) -> Self {
        Self {
            window,
            required_taps: required_taps.max(1),
            tap_count: 0,
            last_tap: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::milliseconds(config.monitor.tap_window_ms),
            config.monitor.required_taps,
        )
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Register a tap; returns true when the gesture completes.
    pub fn handle_tap(&mut self, now: DateTime<Utc>) -> bool {
        let continues = self
            .last_tap
            .map(|last| now.signed_duration_since(last) <= self.window)
            .unwrap_or(false);

        self.tap_count = if continues { self.tap_count + 1 } else { 1 };
        self.last_tap = Some(now);

        if self.tap_count >= self.required_taps {
            tracing::info!(taps = self.tap_count, "Emergency gesture recognised");
            self.tap_count = 0;
            return true;
        }
        false
    }

    /// Drop a partial sequence once the window has passed without a tap
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if let Some(last) = self.last_tap {
            if now.signed_duration_since(last) >= self.window {
                self.tap_count = 0;
            }
        }
    }
}
