// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar normalization anchored to Brazil's timezone.
//!
//! All eligibility rules compare dates at day granularity in a single
//! fixed reference timezone (`America/Sao_Paulo`), so that "today" is
//! stable regardless of the host timezone and date arithmetic is never
//! perturbed by time-of-day or DST drift.
//!
//! ## Invariants
//!
//! - Two normalized values differ only if their Brazil calendar days differ
//! - Day-only strings (`YYYY-MM-DD`) parse to that exact calendar day
//! - Full timestamps are truncated to their Brazil calendar day

use crate::error::DomainError;
use chrono::{DateTime, Months, NaiveDate, Utc};
use chrono_tz::Tz;

/// The fixed reference timezone for all day-granularity comparisons.
pub const BRAZIL_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Parses a date input into a Brazil calendar day.
///
/// Strict `YYYY-MM-DD` strings are interpreted as that exact calendar day.
/// Anything else falls back to a permissive RFC 3339 parse, truncated to
/// the instant's Brazil calendar day.
///
/// # Errors
///
/// Returns `DomainError::DateParse` if the input matches neither form.
pub fn parse_day(input: &str) -> Result<NaiveDate, DomainError> {
    if is_day_only(input) {
        return NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|err| {
            DomainError::DateParse {
                date_string: input.to_string(),
                error: err.to_string(),
            }
        });
    }

    // Permissive fallback for full timestamps.
    DateTime::parse_from_rfc3339(input)
        .map(|instant| instant.with_timezone(&BRAZIL_TZ).date_naive())
        .map_err(|err| DomainError::DateParse {
            date_string: input.to_string(),
            error: err.to_string(),
        })
}

/// Checks for the strict `YYYY-MM-DD` shape (exactly four year digits).
fn is_day_only(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if matches!(i, 4 | 7) { *b == b'-' } else { b.is_ascii_digit() })
}

/// Returns the current Brazil calendar day.
#[must_use]
pub fn today() -> NaiveDate {
    brazil_day(Utc::now())
}

/// Truncates an instant to its Brazil calendar day.
#[must_use]
pub fn brazil_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&BRAZIL_TZ).date_naive()
}

/// Adds whole calendar years to a date (anniversary arithmetic).
///
/// Feb 29 clamps to Feb 28 in non-leap years. Arithmetic overflow clamps
/// to the far future, which is outside any representable eligibility
/// window.
#[must_use]
pub fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_add_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns January 1 of the given year.
#[must_use]
pub fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// Number of whole calendar days from `earlier` to `later`.
///
/// Negative when `later` precedes `earlier`.
#[must_use]
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_only() {
        let parsed = parse_day("2024-06-01").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_long_year() {
        // A five-digit year must not slip through the day-only path.
        assert!(parse_day("20240-06-01").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_day("not-a-date").is_err());
        assert!(parse_day("2024/06/01").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn test_parse_timestamp_fallback_truncates_to_brazil_day() {
        // 01:30 UTC is still the previous calendar day in Brazil (UTC-3).
        let parsed = parse_day("2024-06-02T01:30:00Z").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_brazil_day_is_stable_across_the_utc_boundary() {
        let before_midnight_utc = DateTime::parse_from_rfc3339("2024-06-01T23:59:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let after_midnight_utc = DateTime::parse_from_rfc3339("2024-06-02T02:59:00Z")
            .unwrap()
            .with_timezone(&Utc);

        // Both instants fall on June 1 in Brazil.
        assert_eq!(brazil_day(before_midnight_utc), brazil_day(after_midnight_utc));
    }

    #[test]
    fn test_add_years_anniversary() {
        let issue = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            add_years(issue, 1),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        let issue = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            add_years(issue, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_days_between_signs() {
        let a = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(days_between(b, a), 26);
        assert_eq!(days_between(a, b), -26);
    }
}
