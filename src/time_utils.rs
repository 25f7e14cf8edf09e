// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A start timestamp reduced to what the aggregates need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime {
    /// Wall-clock time in the timestamp's own offset
    pub local: NaiveDateTime,
    /// Calendar day in the timestamp's own (local) offset
    pub local_date: NaiveDate,
    /// Absolute instant, when the timestamp carries an offset
    pub utc: Option<DateTime<Utc>>,
}

/// Parse a local start timestamp.
///
/// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// wall-clock time, or a bare `YYYY-MM-DD` date. The calendar day is taken
/// in the offset the timestamp was written in, never converted to UTC.
pub fn parse_local(value: &str) -> Option<StartTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(StartTime {
            local: dt.naive_local(),
            local_date: dt.date_naive(),
            utc: Some(dt.with_timezone(&Utc)),
        });
    }

    if let Some(naive) = parse_naive(value) {
        return Some(StartTime {
            local: naive,
            local_date: naive.date(),
            utc: None,
        });
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|local_date| StartTime {
            local: local_date.and_time(NaiveTime::MIN),
            local_date,
            utc: None,
        })
}

/// Parse a UTC timestamp. Naive values are taken to already be in UTC.
pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_naive(value).map(|naive| naive.and_utc())
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_uses_own_offset() {
        // 23:30 in Shanghai is still the previous day's afternoon in UTC,
        // but the local calendar day is what counts.
        let parsed = parse_local("2024-01-01T23:30:00+08:00").expect("parse");
        assert_eq!(parsed.local_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            format_utc_rfc3339(parsed.utc.unwrap()),
            "2024-01-01T15:30:00Z"
        );

        let parsed = parse_local("2024-01-02T01:00:00+08:00").expect("parse");
        assert_eq!(parsed.local_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_naive_and_date_only() {
        let parsed = parse_local("2024-03-05T06:07:08.250").expect("parse");
        assert_eq!(parsed.local_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(parsed.utc.is_none());

        let parsed = parse_local("2024-03-05").expect("parse");
        assert_eq!(parsed.local_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_local("yesterday").is_none());
        assert!(parse_local("").is_none());
        assert!(parse_utc("2024-13-40T00:00:00Z").is_none());
    }

    #[test]
    fn test_parse_utc_naive_assumed_utc() {
        let utc = parse_utc("2024-01-01 10:00:00").expect("parse");
        assert_eq!(format_utc_rfc3339(utc), "2024-01-01T10:00:00Z");
    }
}
