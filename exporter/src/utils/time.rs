//! Time utility functions

use chrono::{DateTime, Utc};

/// Convert whole seconds since the Unix epoch to `DateTime<Utc>`
pub fn seconds_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Parse an RFC 3339 timestamp, normalizing to UTC
pub fn parse_rfc3339(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_seconds_to_datetime_epoch() {
        assert_eq!(seconds_to_datetime(0), Some(DateTime::UNIX_EPOCH));
    }

    #[test]
    fn test_seconds_to_datetime_known_value() {
        // 2024-01-01 00:00:00 UTC
        let dt = seconds_to_datetime(1_704_067_200).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_seconds_to_datetime_out_of_range() {
        assert!(seconds_to_datetime(i64::MAX).is_none());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_rfc3339("2024-01-15T10:30:00+05:00").unwrap();
        assert_eq!(dt.hour(), 5);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_rfc3339_invalid() {
        assert!(parse_rfc3339("yesterday").is_none());
    }
}
