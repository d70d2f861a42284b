// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, Duration, Utc};

/// Format a UTC timestamp for display next to a task.
pub fn format_short(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Resolve a token expiry from the absolute `expires_at` (Unix seconds) when
/// the service sends one, falling back to `now + expires_in`.
///
/// Returns `None` when neither yields a representable time.
pub fn expiry_from(
    expires_at: Option<i64>,
    expires_in: i64,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if let Some(at) = expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
        return Some(at);
    }
    Duration::try_seconds(expires_in).and_then(|delta| now.checked_add_signed(delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_short() {
        let date = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_short(date), "2026-03-04 05:06");
    }

    #[test]
    fn test_expiry_prefers_absolute() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let absolute = now.timestamp() + 60;
        assert_eq!(
            expiry_from(Some(absolute), 3600, now).map(|t| t.timestamp()),
            Some(absolute)
        );
        assert_eq!(expiry_from(None, 3600, now), Some(now + Duration::hours(1)));
    }

    #[test]
    fn test_expiry_out_of_range() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(expiry_from(None, i64::MAX, now), None);
        assert_eq!(expiry_from(None, i64::MAX / 1000, now), None);
        // An unusable absolute expiry falls back to the relative one.
        assert_eq!(
            expiry_from(Some(i64::MAX), 60, now),
            Some(now + Duration::seconds(60))
        );
    }
}
