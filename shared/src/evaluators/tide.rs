//! Tide window evaluation
//!
//! The phase lookup reuses the tag of the bounding event and does not model
//! the tidal curve between events. Outside the day's recorded window the
//! last event's tag applies.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AlertKind, AlertRecord, TideEvent, TidePhase};

pub const HIGH_TIDE_TITLE: &str = "≈ High Tide Alert ≈";

/// Number of tide events published per day
pub const TIDE_EVENTS_PER_DAY: usize = 4;

/// The next tide event after "now"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NextTide {
    pub event: TideEvent,
    /// The day's events are all past; this is the first event wrapped to tomorrow
    pub tomorrow: bool,
    pub minutes_until: i64,
}

/// An upcoming high tide inside the warning horizon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighTideWarning {
    pub event: TideEvent,
    pub hours_until: f64,
}

impl HighTideWarning {
    /// Hours until the event rounded to one decimal
    pub fn rounded_hours(&self) -> f64 {
        (self.hours_until * 10.0).round() / 10.0
    }

    pub fn message(&self) -> String {
        format!("High tide approaching in {:.1} hours", self.hours_until)
    }

    pub fn to_alert(&self, at: DateTime<Utc>) -> AlertRecord {
        AlertRecord::new(AlertKind::HighTide, HIGH_TIDE_TITLE, self.message(), at)
    }
}

/// Current tide situation for the wearer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TideOutlook {
    pub phase: TidePhase,
    pub next: NextTide,
    pub warning: Option<HighTideWarning>,
}

/// Evaluate today's four tide events against `now` in the device's zone.
///
/// Event times are read as times of day on `now`'s local calendar date.
/// Returns `None` unless there are exactly four events with parseable times.
pub fn evaluate_tides<Tz: TimeZone>(
    events: &[TideEvent],
    now: &DateTime<Tz>,
    horizon_hours: f64,
) -> Option<TideOutlook> {
    if events.len() != TIDE_EVENTS_PER_DAY {
        return None;
    }
    let local_now = now.naive_local();
    let today = local_now.date();
    let times = events
        .iter()
        .map(|event| event.time_of_day().map(|t| today.and_time(t)))
        .collect::<Result<Vec<NaiveDateTime>, _>>()
        .ok()?;

    Some(TideOutlook {
        phase: current_phase(events, &times, local_now),
        next: next_tide(events, &times, local_now),
        warning: high_tide_warning(events, &times, local_now, horizon_hours),
    })
}

/// High tide alert for `now`, if an upcoming high tide falls inside the horizon
pub fn evaluate_high_tide<Tz: TimeZone>(
    events: &[TideEvent],
    now: &DateTime<Tz>,
    horizon_hours: f64,
) -> Option<AlertRecord> {
    let warning = evaluate_tides(events, now, horizon_hours)?.warning?;
    Some(warning.to_alert(now.with_timezone(&Utc)))
}

fn current_phase(events: &[TideEvent], times: &[NaiveDateTime], now: NaiveDateTime) -> TidePhase {
    let index = if now < times[0] || now > times[3] {
        3
    } else if now < times[1] {
        0
    } else if now < times[2] {
        1
    } else {
        2
    };
    events[index].phase()
}

fn next_tide(events: &[TideEvent], times: &[NaiveDateTime], now: NaiveDateTime) -> NextTide {
    match times.iter().position(|t| *t > now) {
        Some(index) => NextTide {
            event: events[index].clone(),
            tomorrow: false,
            minutes_until: (times[index] - now).num_minutes(),
        },
        None => NextTide {
            event: events[0].clone(),
            tomorrow: true,
            minutes_until: (times[0] + Duration::days(1) - now).num_minutes(),
        },
    }
}

/// Only the first future high tide is considered; later ones are further away.
fn high_tide_warning(
    events: &[TideEvent],
    times: &[NaiveDateTime],
    now: NaiveDateTime,
    horizon_hours: f64,
) -> Option<HighTideWarning> {
    let (event, time) = events
        .iter()
        .zip(times)
        .find(|(event, time)| event.is_high_tide && **time > now)?;

    let hours_until = (*time - now).num_milliseconds() as f64 / 3_600_000.0;
    (hours_until > 0.0 && hours_until <= horizon_hours).then(|| HighTideWarning {
        event: event.clone(),
        hours_until,
    })
}
