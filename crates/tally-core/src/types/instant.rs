//! UTC-anchored instant type.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{TallyError, TallyResult};

/// A point in time, normalized to UTC at construction.
///
/// Every way of building an `Instant` converts to UTC first, so nothing
/// downstream ever looks at the host's local timezone. Bare calendar dates
/// (`"2024-01-05"`) are read as UTC midnight.
///
/// # Example
///
/// ```rust
/// use tally_core::types::Instant;
///
/// let a = Instant::parse("2024-01-05").unwrap();
/// let b = Instant::parse("2024-01-04T19:00:00-05:00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "2024-01-05T00:00:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    #[must_use]
    pub fn unix_epoch() -> Self {
        Instant(DateTime::<Utc>::default())
    }

    /// Converts a timezone-aware datetime to UTC.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        Instant(datetime.with_timezone(&Utc))
    }

    /// UTC midnight of the given calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Instant(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// UTC midnight of year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::InvalidInstant` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> TallyResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_date)
            .ok_or_else(|| TallyError::invalid_instant(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ingestion timestamp.
    ///
    /// Accepts RFC 3339 with any offset, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
    /// (read as UTC), or a bare `YYYY-MM-DD` (read as UTC midnight).
    ///
    /// # Errors
    ///
    /// Returns `TallyError::InvalidInstant` if none of the formats match.
    pub fn parse(s: &str) -> TallyResult<Self> {
        let s = s.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(datetime));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Instant(naive.and_utc()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| TallyError::invalid_instant(format!("Cannot parse: {s}")))
    }

    /// Returns the underlying UTC datetime.
    #[must_use]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the UTC calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Returns the UTC year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the UTC month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the UTC day of month (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Truncates to UTC midnight of the same day.
    #[must_use]
    pub fn start_of_day(&self) -> Self {
        Self::from_date(self.date())
    }

    /// Shifts by whole days, keeping the time of day.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Overflow` if the result leaves chrono's range.
    pub fn add_days(&self, days: i64) -> TallyResult<Self> {
        let step = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(step)
        } else {
            self.0.checked_sub_days(step)
        };
        shifted
            .map(Instant)
            .ok_or_else(|| TallyError::overflow(format!("{self} shifted by {days} days")))
    }

    /// Formats the UTC date as `YYYY-MM-DD`, the form the finance API expects.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Instant(datetime)
    }
}

impl From<Instant> for DateTime<Utc> {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl From<NaiveDate> for Instant {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl std::str::FromStr for Instant {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_date_is_utc_midnight() {
        let instant = Instant::parse("2024-01-05").unwrap();
        assert_eq!(instant.to_string(), "2024-01-05T00:00:00Z");
        assert_eq!(instant, Instant::from_ymd(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        // 23:30 in New York on Jan 31 is already Feb 1 in UTC
        let instant = Instant::parse("2024-01-31T23:30:00-05:00").unwrap();
        assert_eq!(instant.month(), 2);
        assert_eq!(instant.day(), 1);
        assert_eq!(instant.date_string(), "2024-02-01");
    }

    #[test]
    fn test_naive_datetime_is_read_as_utc() {
        let instant = Instant::parse("2024-03-10T02:30:00").unwrap();
        assert_eq!(instant.to_string(), "2024-03-10T02:30:00Z");

        let fractional = Instant::parse("2024-03-10T02:30:00.250").unwrap();
        assert_eq!(fractional.start_of_day(), Instant::from_ymd(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(Instant::parse("2024-02-30").is_err());
        assert!(Instant::parse("yesterday").is_err());
        assert!(Instant::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_add_days() {
        let start = Instant::parse("2024-02-28T12:00:00Z").unwrap();
        assert_eq!(start.add_days(1).unwrap().to_string(), "2024-02-29T12:00:00Z");
        assert_eq!(start.add_days(-28).unwrap().to_string(), "2024-01-31T12:00:00Z");
    }

    #[test]
    fn test_unix_epoch() {
        assert_eq!(Instant::unix_epoch().to_string(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_serde() {
        let instant = Instant::parse("2024-06-15T08:00:00+02:00").unwrap();
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"2024-06-15T06:00:00Z\"");
        let parsed: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(instant, parsed);

        let from_date: Instant = serde_json::from_str("\"2024-06-15\"").unwrap();
        assert_eq!(from_date, Instant::from_ymd(2024, 6, 15).unwrap());
    }
}
