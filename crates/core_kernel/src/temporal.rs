//! Canonical time zone handling
//!
//! Stored timestamps come in two shapes:
//! - Aware: carries an explicit UTC offset
//! - Naive: no zone metadata at all
//!
//! Historical rows were always written as local wall-clock time, so a naive
//! timestamp is read *as if* it were already expressed in the canonical zone.
//! It is tagged with that zone without shifting the clock value. Aware
//! timestamps are converted, keeping the instant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::CoreError;

/// Naive layouts accepted by [`StoredTimestamp::parse`], tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Local time {local} does not exist in {zone}")]
    NonexistentLocalTime {
        local: String,
        zone: String,
    },
}

/// The single zone every timestamp is displayed in
///
/// Wraps `chrono_tz::Tz` with serialization by IANA name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalZone(Tz);

impl Serialize for CanonicalZone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for CanonicalZone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(CanonicalZone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl fmt::Display for CanonicalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl CanonicalZone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Builds the canonical zone from a configured IANA name
    ///
    /// There is no fallback: a missing or unknown zone is a
    /// configuration error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if the name is absent, blank, or
    /// not a known IANA zone.
    pub fn from_config(name: Option<&str>) -> Result<Self, CoreError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CoreError::configuration("display timezone is not configured"))?;

        Tz::from_str(name)
            .map(Self)
            .map_err(|_| CoreError::configuration(format!("unknown display timezone: {}", name)))
    }

    /// Returns the underlying zone
    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Returns the IANA name of the zone
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Normalizes a stored timestamp into this zone
    ///
    /// - Aware input keeps its instant and is re-expressed here.
    /// - Naive input keeps its wall clock and is tagged with this zone.
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::NonexistentLocalTime` when a naive value falls
    /// in a daylight-saving gap of this zone.
    pub fn normalize(&self, raw: &StoredTimestamp) -> Result<DateTime<Tz>, TemporalError> {
        match raw {
            StoredTimestamp::Aware(aware) => Ok(aware.with_timezone(&self.0)),
            StoredTimestamp::Naive(naive) => self.attach(*naive),
        }
    }

    /// Re-expresses a UTC instant in this zone
    pub fn normalize_utc(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Tags a wall-clock value with this zone without shifting it
    ///
    /// In a fall-back overlap the earlier of the two instants is chosen.
    pub fn attach(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>, TemporalError> {
        match self.0.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => Err(TemporalError::NonexistentLocalTime {
                local: naive.to_string(),
                zone: self.0.name().to_string(),
            }),
        }
    }

    /// Returns the UTC instants bounding a local calendar day, as `[start, end)`
    ///
    /// Where a daylight-saving jump skips midnight, the day starts at the
    /// first wall-clock time that exists.
    pub fn local_day_bounds(&self, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), TemporalError> {
        let next = date
            .succ_opt()
            .ok_or_else(|| TemporalError::InvalidTimestamp(format!("no day after {}", date)))?;
        let start = self.start_of_day(date)?;
        let end = self.start_of_day(next)?;
        Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
    }

    fn start_of_day(&self, date: NaiveDate) -> Result<DateTime<Tz>, TemporalError> {
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        // Gaps are whole minutes and shorter than a day
        (0..MINUTES_PER_DAY)
            .find_map(|minute| self.attach(midnight + Duration::minutes(minute)).ok())
            .ok_or_else(|| TemporalError::NonexistentLocalTime {
                local: midnight.to_string(),
                zone: self.0.name().to_string(),
            })
    }
}

/// Normalizes a stored timestamp into the canonical zone
///
/// Free-function form of [`CanonicalZone::normalize`].
pub fn normalize_timestamp(zone: &CanonicalZone, raw: &StoredTimestamp) -> Result<DateTime<Tz>, TemporalError> {
    zone.normalize(raw)
}

/// A timestamp as loaded from storage, with or without zone metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredTimestamp {
    /// No zone metadata; read as canonical local time
    Naive(NaiveDateTime),
    /// Explicit UTC offset
    Aware(DateTime<FixedOffset>),
}

impl StoredTimestamp {
    /// Parses a stored timestamp string
    ///
    /// Strings with an offset (`2024-03-01T09:30:00+07:00`, `...Z`,
    /// `2024-03-01 09:30:00+07:00`) are aware. Strings without one, including
    /// a bare date, are naive.
    pub fn parse(raw: &str) -> Result<Self, TemporalError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TemporalError::InvalidTimestamp("empty timestamp".to_string()));
        }

        if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::Aware(aware));
        }
        if let Ok(aware) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Ok(Self::Aware(aware));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self::Naive(naive));
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| Self::Naive(date.and_time(chrono::NaiveTime::MIN)))
            .map_err(|_| TemporalError::InvalidTimestamp(raw.to_string()))
    }

    /// Returns true if the value carries no zone metadata
    pub fn is_naive(&self) -> bool {
        matches!(self, Self::Naive(_))
    }
}

impl From<NaiveDateTime> for StoredTimestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Naive(naive)
    }
}

impl From<DateTime<FixedOffset>> for StoredTimestamp {
    fn from(aware: DateTime<FixedOffset>) -> Self {
        Self::Aware(aware)
    }
}

impl From<DateTime<Utc>> for StoredTimestamp {
    fn from(utc: DateTime<Utc>) -> Self {
        Self::Aware(utc.fixed_offset())
    }
}

impl FromStr for StoredTimestamp {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StoredTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Aware(aware) => f.write_str(&aware.to_rfc3339()),
        }
    }
}

impl Serialize for StoredTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StoredTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn saigon() -> CanonicalZone {
        CanonicalZone::new(chrono_tz::Asia::Ho_Chi_Minh)
    }

    #[test]
    fn test_naive_is_not_shifted() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let normalized = saigon().normalize(&StoredTimestamp::Naive(naive)).unwrap();

        assert_eq!(normalized.naive_local(), naive);
        assert_eq!(normalized.timezone(), chrono_tz::Asia::Ho_Chi_Minh);
    }

    #[test]
    fn test_aware_keeps_instant() {
        let aware = DateTime::parse_from_rfc3339("2024-03-01T02:30:00Z").unwrap();
        let normalized = saigon().normalize(&StoredTimestamp::Aware(aware)).unwrap();

        assert_eq!(normalized.hour(), 9);
        assert_eq!(normalized.with_timezone(&Utc), aware.with_timezone(&Utc));
    }

    #[test]
    fn test_missing_zone_is_configuration_error() {
        assert!(matches!(CanonicalZone::from_config(None), Err(CoreError::Configuration(_))));
        assert!(matches!(CanonicalZone::from_config(Some("  ")), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_parse_shapes() {
        assert!(StoredTimestamp::parse("2024-03-01 09:30:00").unwrap().is_naive());
        assert!(StoredTimestamp::parse("2024-03-01").unwrap().is_naive());
        assert!(!StoredTimestamp::parse("2024-03-01T09:30:00+07:00").unwrap().is_naive());
        assert!(StoredTimestamp::parse("yesterday").is_err());
    }
}
