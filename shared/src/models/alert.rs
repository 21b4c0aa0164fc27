//! Alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a safety alert. Each kind has its own cooldown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Typhoon,
    ClimateAnomaly,
    HighTide,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [
        AlertKind::Typhoon,
        AlertKind::ClimateAnomaly,
        AlertKind::HighTide,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AlertKind::Typhoon => "typhoon",
            AlertKind::ClimateAnomaly => "climate_anomaly",
            AlertKind::HighTide => "high_tide",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An emitted alert. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRecord {
    pub id: Uuid,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl AlertRecord {
    pub fn new(
        kind: AlertKind,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            created_at,
        }
    }
}
