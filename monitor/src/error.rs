//! Error handling for the dive safety monitor
//!
//! Evaluators never fail; these errors cover configuration, snapshot input
//! and the service lifecycle.

use thiserror::Error;

use shared::ThresholdError;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error(transparent)]
    InvalidThresholds(#[from] ThresholdError),

    #[error("Failed to read snapshot: {0}")]
    SnapshotIo(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("Alert monitoring is stopped")]
    MonitoringStopped,
}

/// Result type alias for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
