//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate in kilometres
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        crate::geo::distance_km(self, other)
    }
}

/// Lenient decoding for numeric fields delivered by upstream APIs.
///
/// Accepts a JSON number, a numeric string (`"12.5"`), `null` or an absent
/// field. Anything unparseable or non-finite decodes to `None` instead of
/// failing the whole payload. Use with
/// `#[serde(default, deserialize_with = "lenient_f64::deserialize")]`.
pub mod lenient_f64 {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Raw::Number(n)) => finite(n),
            Some(Raw::Text(s)) => parse(&s),
            Some(Raw::Other(_)) | None => None,
        })
    }

    /// Parse a numeric string, trimming whitespace. Non-finite values are rejected.
    pub fn parse(s: &str) -> Option<f64> {
        s.trim().parse::<f64>().ok().and_then(finite)
    }

    fn finite(n: f64) -> Option<f64> {
        n.is_finite().then_some(n)
    }
}

/// Decoding for typhoon sequence numbers, which feeds send either as a JSON
/// number or as a numeric string (`"11"`).
pub mod sequence_number {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid sequence number '{}'", s))),
        }
    }
}
