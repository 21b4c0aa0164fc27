//! Dive safety monitor
//!
//! Orchestrates the shared decision core: owns the alert thresholds, the
//! cooldown gate, the active alert list and the emergency escalation state.

pub mod config;
pub mod error;
pub mod services;
pub mod snapshot;

pub use config::Config;
pub use error::{MonitorError, MonitorResult};
pub use snapshot::PollSnapshot;
