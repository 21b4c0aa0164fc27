//! Dive Safety Monitor - snapshot replay
//!
//! Loads configuration, evaluates one poll snapshot and prints the alerts,
//! tide outlook and health assessment as JSON lines.

use std::sync::Arc;

use chrono::{Duration, Local, Utc};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dive_safety_monitor::services::{AlertService, AlertSink, HealthService, TracingSink};
use dive_safety_monitor::{Config, PollSnapshot};
use shared::{evaluate_tides, AlertRecord, CooldownGate};

/// Logs each delivered alert and prints it on stdout
struct JsonLinesSink {
    log: TracingSink,
}

impl AlertSink for JsonLinesSink {
    fn deliver(&self, alert: &AlertRecord) {
        self.log.deliver(alert);
        println!("{}", json!({ "alert": alert }));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dive_monitor=debug,dive_safety_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load_or_default();

    tracing::info!("Starting Dive Safety Monitor");
    tracing::info!("Environment: {}", config.environment);

    let path = std::env::args()
        .nth(1)
        .or_else(|| config.monitor.snapshot_path.clone())
        .ok_or_else(|| anyhow::anyhow!("usage: dive-monitor <snapshot.json>"))?;

    tracing::info!("Replaying snapshot {}", path);
    let snapshot = PollSnapshot::from_path(&path)?;

    let now = match snapshot.observed_at {
        Some(observed_at) => observed_at,
        None => {
            let local = Local::now();
            local.with_timezone(local.offset())
        }
    };

    let gate = Arc::new(CooldownGate::new(Duration::seconds(config.cooldown.alert_secs)));
    let sink = Arc::new(JsonLinesSink { log: TracingSink });
    let alerts = AlertService::from_config(&config, gate, sink);
    alerts.start_monitoring();

    let emitted = alerts.check_all(&snapshot, now).await?;
    tracing::info!(count = emitted.len(), "Alert check finished");

    if let Some(outlook) = evaluate_tides(
        &snapshot.tides,
        &now,
        config.thresholds.tide_alert_horizon_hours,
    ) {
        println!("{}", json!({ "tide_outlook": outlook }));
    }

    if let Some(vitals) = &snapshot.vitals {
        let health = HealthService::from_config(&config);
        let assessment = health.assess(vitals, now.with_timezone(&Utc));
        println!("{}", json!({ "health": assessment }));
    }

    Ok(())
}
