//! Snapshot replay tests
//!
//! Decodes a recorded poll and runs it through the alert and health services.

use std::sync::Arc;

use dive_safety_monitor::services::{AlertService, HealthService, RecordingSink};
use dive_safety_monitor::{Config, MonitorError, PollSnapshot};
use shared::{evaluate_tides, AlertKind, CooldownGate, HealthAlertLevel, TidePhase, TyphoonTier};

const BUSAN_SNAPSHOT: &str = include_str!("fixtures/busan_snapshot.json");

#[test]
fn test_decode_lenient_fields() {
    let snapshot = PollSnapshot::from_json(BUSAN_SNAPSHOT).unwrap();

    let weather = snapshot.weather.unwrap();
    assert_eq!(weather.wind_speed_ms, Some(17.2));
    assert_eq!(weather.humidity_pct, Some(81.0));
    // Placeholder decodes as missing
    assert_eq!(weather.rain_mm, None);

    assert_eq!(snapshot.tides.len(), 4);
    assert_eq!(snapshot.tides[3].height_label, None);

    let point = &snapshot.typhoons[0].forecasts[0];
    assert_eq!(point.central_pressure_hpa, Some(955.0));

    let vitals = snapshot.vitals.unwrap();
    assert_eq!(vitals.heart_rate_bpm, Some(82.0));
    assert_eq!(vitals.systolic_mmhg, Some(118.0));
}

#[test]
fn test_typhoon_point_gaps_keep_the_rest_of_the_poll() {
    let snapshot = PollSnapshot::from_json(
        r#"{
            "location": {"latitude": 35.1796, "longitude": 129.0756},
            "weather": {"wind_speed_ms": "30"},
            "typhoons": [{
                "sequence_id": "14",
                "announced_at": "202508210400",
                "forecasts": [{"latitude": "32.1", "longitude": "-", "wind_speed_ms": "35"}]
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(snapshot.weather.unwrap().wind_speed_ms, Some(30.0));
    let track = &snapshot.typhoons[0];
    assert_eq!(track.sequence_id, 14);
    assert_eq!(track.forecasts[0].longitude, None);
    assert_eq!(track.forecasts[0].central_pressure_hpa, None);
    assert!(track.forecasts[0].location_label.is_empty());
}

#[tokio::test]
async fn test_incomplete_typhoon_still_raises_climate_alert() {
    let snapshot = PollSnapshot::from_json(
        r#"{
            "location": {"latitude": 35.1796, "longitude": 129.0756},
            "observed_at": "2025-08-21T09:00:00+09:00",
            "weather": {"wind_speed_ms": "30"},
            "typhoons": [{
                "sequence_id": 14,
                "announced_at": "202508210400",
                "forecasts": [{"latitude": "32.1", "longitude": "127.4"}]
            }]
        }"#,
    )
    .unwrap();

    let service = AlertService::from_config(
        &Config::default(),
        Arc::new(CooldownGate::default()),
        Arc::new(RecordingSink::new()),
    );
    service.start_monitoring();
    let alerts = service
        .check_all(&snapshot, snapshot.observed_at.unwrap())
        .await
        .unwrap();

    let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AlertKind::ClimateAnomaly]);
    assert_eq!(alerts[0].message, "High wind: 30.0m/s");
}

#[test]
fn test_minimal_snapshot() {
    let snapshot =
        PollSnapshot::from_json(r#"{"location": {"latitude": 33.5, "longitude": 126.5}}"#).unwrap();
    assert_eq!(snapshot, PollSnapshot::new(shared::Coordinate::new(33.5, 126.5)));
}

#[test]
fn test_malformed_snapshot() {
    let result = PollSnapshot::from_json(r#"{"weather": {}}"#);
    assert!(matches!(result, Err(MonitorError::SnapshotParse(_))));

    let result = PollSnapshot::from_path("does/not/exist.json");
    assert!(matches!(result, Err(MonitorError::SnapshotIo(_))));
}

#[tokio::test]
async fn test_replay_snapshot() {
    let snapshot = PollSnapshot::from_json(BUSAN_SNAPSHOT).unwrap();
    let now = snapshot.observed_at.unwrap();
    let config = Config::default();

    let sink = Arc::new(RecordingSink::new());
    let service = AlertService::from_config(&config, Arc::new(CooldownGate::default()), sink.clone());
    service.start_monitoring();

    let alerts = service.check_all(&snapshot, now).await.unwrap();
    let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![AlertKind::Typhoon, AlertKind::ClimateAnomaly, AlertKind::HighTide]
    );
    assert_eq!(alerts[0].title, TyphoonTier::Warning.title());
    assert!(alerts[0].message.starts_with("Typhoon No.11 approaching"));
    assert_eq!(alerts[1].message, "High wind: 17.2m/s, High waves: 3.8m");
    assert_eq!(sink.delivered().len(), 3);

    let outlook = evaluate_tides(&snapshot.tides, &now, config.thresholds.tide_alert_horizon_hours)
        .unwrap();
    assert_eq!(outlook.phase, TidePhase::Low);
    assert_eq!(outlook.next.event.local_time, "18:00");

    let health = HealthService::from_config(&config).assess(
        &snapshot.vitals.unwrap(),
        now.with_timezone(&chrono::Utc),
    );
    assert_eq!(health.heart_rate.unwrap().level, HealthAlertLevel::Normal);
    assert!(health.emergency.is_none());
}
