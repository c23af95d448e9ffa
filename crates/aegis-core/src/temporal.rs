//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp enforcing ISO 8601 with `Z`
//! suffix at seconds precision, and the epoch-millisecond clock used for
//! audit entry timestamps.
//!
//! ## Security Invariant
//!
//! Timestamps that enter canonical byte production must be UTC with `Z`
//! suffix. Local timezone offsets would render the same instant as
//! different canonical bytes, breaking hash and signature verification
//! across nodes. Non-UTC inputs are rejected at construction, not
//! silently converted.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimestampError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Renders and serializes as `YYYY-MM-DDTHH:MM:SSZ`. Used for credential
/// issuance, expiration, and proof creation dates.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating.
/// - [`Timestamp::parse()`] — from an ISO 8601 string, rejecting non-UTC
///   offsets (even `+00:00`).
/// - [`Timestamp::from_epoch_secs()`] — from a Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO 8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only the `Z` suffix is accepted;
    /// explicit offsets like `+00:00` or `+05:30` fail even when
    /// semantically equivalent to UTC, so canonical renderings stay
    /// deterministic.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        if !s.ends_with('Z') {
            return Err(TimestampError::NonUtc(s.to_string()));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|source| TimestampError::Invalid {
            input: s.to_string(),
            source,
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, TimestampError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or(TimestampError::OutOfRange(secs))?;
        Ok(Self(dt))
    }

    /// Returns a new timestamp offset by the given number of milliseconds,
    /// truncated back to seconds precision.
    ///
    /// Returns `None` if the offset overflows the representable range.
    pub fn checked_add_millis(&self, millis: i64) -> Option<Self> {
        let delta = chrono::Duration::try_milliseconds(millis)?;
        self.0
            .checked_add_signed(delta)
            .map(|dt| Self(truncate_to_seconds(dt)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as ISO 8601 with Z suffix (e.g. `2026-01-15T12:00:00Z`).
    ///
    /// This is the exact rendering fed into canonical byte production for
    /// credential dates.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Current wall-clock time as Unix epoch milliseconds.
///
/// Audit entry timestamps are epoch millis on the wire; this is the one
/// clock read used to produce them.
pub fn epoch_millis_now() -> i64 {
    Utc::now().timestamp_millis()
}

/// Truncate a `DateTime<Utc>` to seconds precision.
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 45).unwrap();
        let with_nanos = dt.with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::from_utc(with_nanos);
        assert_eq!(ts.to_iso8601(), "2026-03-02T08:30:45Z");
    }

    #[test]
    fn test_parse_z_suffix_accepted() {
        let ts = Timestamp::parse("2026-03-02T08:00:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-03-02T08:00:00Z");
    }

    #[test]
    fn test_parse_plus_zero_rejected() {
        assert!(Timestamp::parse("2026-03-02T08:00:00+00:00").is_err());
    }

    #[test]
    fn test_parse_offset_rejected() {
        assert!(Timestamp::parse("2026-03-02T13:00:00+05:00").is_err());
        assert!(Timestamp::parse("2026-03-02T03:00:00-05:00").is_err());
    }

    #[test]
    fn test_parse_subseconds_truncated() {
        let ts = Timestamp::parse("2026-03-02T08:00:00.987Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-03-02T08:00:00Z");
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_epoch_roundtrip() {
        let ts = Timestamp::parse("2026-03-02T08:00:00Z").unwrap();
        let back = Timestamp::from_epoch_secs(ts.epoch_secs()).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn test_checked_add_millis() {
        let ts = Timestamp::parse("2026-03-02T08:00:00Z").unwrap();
        let later = ts.checked_add_millis(90_000).unwrap();
        assert_eq!(later.to_iso8601(), "2026-03-02T08:01:30Z");
    }

    #[test]
    fn test_checked_add_millis_truncates_remainder() {
        let ts = Timestamp::parse("2026-03-02T08:00:00Z").unwrap();
        // 1500ms lands mid-second; the result truncates to :01.
        let later = ts.checked_add_millis(1_500).unwrap();
        assert_eq!(later.to_iso8601(), "2026-03-02T08:00:01Z");
    }

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::parse("2026-03-02T08:00:00Z").unwrap();
        let later = Timestamp::parse("2026-03-02T08:00:01Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_display_matches_iso8601() {
        let ts = Timestamp::parse("2026-03-02T08:00:00Z").unwrap();
        assert_eq!(format!("{ts}"), ts.to_iso8601());
    }

    #[test]
    fn test_epoch_millis_now_is_plausible() {
        // 2020-01-01 in millis; any correct clock reads later than this.
        assert!(epoch_millis_now() > 1_577_836_800_000);
    }
}
