//! Configuration management for the dive safety monitor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with DIVE_ prefix

use config::{Environment, File, FileFormat};
use serde::Deserialize;

use shared::{validate_thresholds, AlertThresholds, DEFAULT_ALERT_COOLDOWN_SECS, DEFAULT_TYPHOON_BATCH_LIMIT};

use crate::error::MonitorResult;

/// Main monitor configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// User-adjustable alert limits
    pub thresholds: AlertThresholds,

    /// Suppression windows
    pub cooldown: CooldownConfig,

    /// Monitoring behaviour
    pub monitor: MonitorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CooldownConfig {
    /// Seconds before an alert kind may fire again
    pub alert_secs: i64,

    /// Seconds between two emergency call requests
    pub emergency_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Typhoon tracks evaluated per check
    pub typhoon_batch_limit: usize,

    /// Number dialled on an emergency
    pub emergency_number: String,

    /// Maximum gap between taps of the emergency gesture (milliseconds)
    pub tap_window_ms: i64,

    /// Taps needed to raise the emergency prompt
    pub required_taps: u32,

    /// Snapshot replayed by the binary when no path is given
    pub snapshot_path: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> MonitorResult<Self> {
        let environment = std::env::var("DIVE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (DIVE_ prefix)
            .add_source(
                Environment::with_prefix("DIVE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> MonitorResult<Self> {
        let config = Self::builder("development")?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration, never failing.
    ///
    /// A load error yields the built-in defaults; thresholds that fail
    /// validation and negative durations are replaced by their defaults.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config.with_valid_thresholds(),
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Replace invalid thresholds (e.g. min temperature above max) and
    /// negative durations by their defaults
    pub fn with_valid_thresholds(mut self) -> Self {
        if let Err(e) = validate_thresholds(&self.thresholds) {
            tracing::warn!("Rejecting configured thresholds, using defaults: {}", e);
            self.thresholds = AlertThresholds::default();
        }

        let defaults = CooldownConfig::default();
        if self.cooldown.alert_secs < 0 {
            tracing::warn!(alert_secs = self.cooldown.alert_secs, "Negative alert cooldown, using default");
            self.cooldown.alert_secs = defaults.alert_secs;
        }
        if self.cooldown.emergency_secs < 0 {
            tracing::warn!(
                emergency_secs = self.cooldown.emergency_secs,
                "Negative emergency latch, using default"
            );
            self.cooldown.emergency_secs = defaults.emergency_secs;
        }
        if self.monitor.tap_window_ms <= 0 {
            tracing::warn!(tap_window_ms = self.monitor.tap_window_ms, "Non-positive tap window, using default");
            self.monitor.tap_window_ms = MonitorConfig::default().tap_window_ms;
        }
        self
    }

    fn builder(
        environment: &str,
    ) -> MonitorResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = AlertThresholds::default();
        Ok(config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("thresholds.wind_speed_max_ms", defaults.wind_speed_max_ms)?
            .set_default("thresholds.temperature_min_c", defaults.temperature_min_c)?
            .set_default("thresholds.temperature_max_c", defaults.temperature_max_c)?
            .set_default("thresholds.wave_height_max_m", defaults.wave_height_max_m)?
            .set_default("thresholds.tide_alert_horizon_hours", defaults.tide_alert_horizon_hours)?
            .set_default("cooldown.alert_secs", DEFAULT_ALERT_COOLDOWN_SECS)?
            .set_default("cooldown.emergency_secs", 60)?
            .set_default("monitor.typhoon_batch_limit", DEFAULT_TYPHOON_BATCH_LIMIT as i64)?
            .set_default("monitor.emergency_number", "112")?
            .set_default("monitor.tap_window_ms", 500)?
            .set_default("monitor.required_taps", 3)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            thresholds: AlertThresholds::default(),
            cooldown: CooldownConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            alert_secs: DEFAULT_ALERT_COOLDOWN_SECS,
            emergency_secs: 60,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            typhoon_batch_limit: DEFAULT_TYPHOON_BATCH_LIMIT,
            emergency_number: "112".to_string(),
            tap_window_ms: 500,
            required_taps: 3,
            snapshot_path: None,
        }
    }
}
