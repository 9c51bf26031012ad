//! Serde helpers for backend timestamps.
//!
//! The backend mixes offset-qualified timestamps (`2024-03-01T10:00:00Z`) with
//! naive ones (`2024-03-01T10:00:00.123456`) that are implicitly UTC. Both are
//! accepted here and normalised to `DateTime<Utc>`; serialization emits RFC 3339
//! with an explicit `+00:00` offset, which Python's `fromisoformat` accepts on
//! every version.
//!
//! A value that is not a recognisable timestamp decodes as `None` with a
//! warning, so one odd field never fails a whole response.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a backend timestamp, treating values without an offset as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `#[serde(with = "timestamp::option")]` for `Option<DateTime<Utc>>` fields
pub mod option {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let parsed = match &raw {
            Value::Null => return Ok(None),
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            Value::String(s) => parse_timestamp(s),
            _ => None,
        };
        if parsed.is_none() {
            tracing::warn!(value = %raw, "Ignoring unrecognised timestamp");
        }
        Ok(parsed)
    }
}
