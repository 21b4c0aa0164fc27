//! Alert delivery seam
//!
//! The monitor decides which alerts survive; showing them on the watch face
//! and buzzing the wearer belongs to whatever implements [`AlertSink`].

use std::sync::{Mutex, PoisonError};

use shared::AlertRecord;

/// Receives every alert that passes the cooldown gate
pub trait AlertSink: Send + Sync {
    fn deliver(&self, alert: &AlertRecord);
}

/// Writes alerts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn deliver(&self, alert: &AlertRecord) {
        tracing::warn!(
            alert_id = %alert.id,
            kind = %alert.kind,
            "{}: {}",
            alert.title,
            alert.message
        );
    }
}

/// Keeps delivered alerts in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<AlertRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<AlertRecord> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AlertSink for RecordingSink {
    fn deliver(&self, alert: &AlertRecord) {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert.clone());
    }
}
