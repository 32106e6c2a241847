//! Timestamps shared by persisted records and reports.
//!
//! A [`Timestamp`] keeps the exact text it was stored as next to the parsed
//! instant. Loading and saving a file therefore writes every stored timestamp
//! back unchanged; the instant is only used for ordering and display.
//!
//! Timestamps created by this program are written as RFC 3339 in UTC. Reading
//! also accepts the offset-less ISO-8601 form older data files contain
//! (`2024-05-01T10:00:00.123456`), interpreted as local time.

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Layout used when a timestamp is shown to a person.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const LEGACY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A point in time together with its persisted spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    raw: String,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }

    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            raw: instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    /// Parse a persisted timestamp, keeping `raw` verbatim.
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let instant = decode(&raw)?;
        Ok(Self { instant, raw })
    }

    /// The instant, for ordering.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The persisted spelling.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Local time using [`DISPLAY_FORMAT`].
    pub fn display(&self) -> String {
        self.instant.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(raw).map_err(serde::de::Error::custom)
    }
}

fn decode(raw: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, LEGACY_FORMAT)
        .map_err(|e| DomainError::validation(format!("invalid timestamp '{raw}': {e}")))?;
    Ok(resolve_local(Local.from_local_datetime(&naive), &naive))
}

/// Pick the earlier reading of an ambiguous local time. A local time that
/// never happened (skipped by a DST change) is read as UTC.
fn resolve_local<Tz: TimeZone>(local: LocalResult<DateTime<Tz>>, naive: &NaiveDateTime) -> DateTime<Utc> {
    match local.earliest() {
        Some(ts) => ts.with_timezone(&Utc),
        None => Utc.from_utc_datetime(naive),
    }
}
