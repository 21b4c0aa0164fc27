//! Typhoon proximity evaluation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::distance_km;
use crate::models::{AlertKind, AlertRecord, TyphoonForecastPoint, TyphoonTier, TyphoonTrack};
use crate::types::Coordinate;

/// Tracks considered per evaluation, most recently announced first
pub const DEFAULT_TYPHOON_BATCH_LIMIT: usize = 2;

/// (tier, max distance km, min wind m/s), most severe first
const TYPHOON_TIERS: [(TyphoonTier, f64, f64); 3] = [
    (TyphoonTier::Warning, 400.0, 25.0),
    (TyphoonTier::WatchUpgraded, 600.0, 20.0),
    (TyphoonTier::Monitoring, 1000.0, 15.0),
];

/// First tier whose distance AND wind conditions both hold
pub fn classify_typhoon_tier(distance_km: f64, wind_speed_ms: f64) -> Option<TyphoonTier> {
    TYPHOON_TIERS
        .iter()
        .find(|(_, max_distance, min_wind)| {
            distance_km <= *max_distance && wind_speed_ms >= *min_wind
        })
        .map(|(tier, _, _)| *tier)
}

/// A typhoon close and strong enough to alert on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TyphoonProximity {
    pub sequence_id: u32,
    pub tier: TyphoonTier,
    pub distance_km: f64,
    pub wind_speed_ms: f64,
    pub central_pressure_hpa: f64,
    pub location_label: String,
}

impl TyphoonProximity {
    pub fn message(&self) -> String {
        let seq = self.sequence_id;
        let distance = self.distance_km as i64;
        let wind = self.wind_speed_ms as i64;
        let pressure = self.central_pressure_hpa as i64;
        match self.tier {
            TyphoonTier::Warning => format!(
                "Typhoon No.{} approaching, {}km away!\nMax wind: {}m/s, central pressure: {}hPa\nLocation: {}",
                seq, distance, wind, pressure, self.location_label
            ),
            TyphoonTier::WatchUpgraded => format!(
                "Typhoon No.{} watch issued\nDistance: {}km, wind: {}m/s, pressure: {}hPa\nLocation: {}",
                seq, distance, wind, pressure, self.location_label
            ),
            TyphoonTier::Monitoring => format!(
                "Monitoring typhoon No.{}\nDistance: {}km, wind: {}m/s, pressure: {}hPa\n{}",
                seq, distance, wind, pressure, self.location_label
            ),
        }
    }

    pub fn to_alert(&self, at: DateTime<Utc>) -> AlertRecord {
        AlertRecord::new(AlertKind::Typhoon, self.tier.title(), self.message(), at)
    }
}

/// Assess one forecast point of typhoon `sequence_id`. Any missing numeric
/// field means no assessment.
pub fn assess_forecast(
    user: &Coordinate,
    sequence_id: u32,
    point: &TyphoonForecastPoint,
) -> Option<TyphoonProximity> {
    let position = point.position()?;
    let wind_speed_ms = point.wind_speed_ms?;
    let central_pressure_hpa = point.central_pressure_hpa?;

    let distance_km = distance_km(user, &position);
    let tier = classify_typhoon_tier(distance_km, wind_speed_ms)?;

    Some(TyphoonProximity {
        sequence_id,
        tier,
        distance_km,
        wind_speed_ms,
        central_pressure_hpa,
        location_label: point.location_label.clone(),
    })
}

/// Assess the latest forecast of the `batch_limit` most recently announced tracks
pub fn nearby_typhoons(
    user: &Coordinate,
    tracks: &[TyphoonTrack],
    batch_limit: usize,
) -> Vec<TyphoonProximity> {
    let mut recent: Vec<&TyphoonTrack> = tracks.iter().collect();
    recent.sort_by(|a, b| b.announced_at.cmp(&a.announced_at));

    recent
        .into_iter()
        .take(batch_limit)
        .filter_map(|track| {
            let latest = track.forecasts.first()?;
            assess_forecast(user, track.sequence_id, latest)
        })
        .collect()
}

/// One typhoon alert per qualifying track
pub fn evaluate_typhoons(
    user: &Coordinate,
    tracks: &[TyphoonTrack],
    batch_limit: usize,
    at: DateTime<Utc>,
) -> Vec<AlertRecord> {
    nearby_typhoons(user, tracks, batch_limit)
        .iter()
        .map(|proximity| proximity.to_alert(at))
        .collect()
}
