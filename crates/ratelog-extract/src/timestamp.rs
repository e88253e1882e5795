//! Observation timestamp resolution.
//!
//! The metadata page carries free-form `Date ...` and `Time ...` lines whose
//! exact layout has drifted across publications. Both are parsed leniently:
//! the text after the marker is scanned token window by token window against
//! a list of candidate formats, day-before-month forms first.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Errors that can occur while resolving the observation timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// No line starting with `Date` parsed to a calendar date.
    #[error("No parseable Date line on the metadata page")]
    MissingDate,

    /// No line starting with `Time` parsed to a clock time.
    #[error("No parseable Time line on the metadata page")]
    MissingTime,
}

/// Candidate date formats, day-first forms before year-first.
const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d-%m-%y", "%d-%b-%Y", "%d-%B-%Y", "%Y-%m-%d"];

/// Candidate clock-time formats, 24-hour forms before AM/PM.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Resolves the observation timestamp from the metadata page.
///
/// Scans for the line beginning with the literal token `Date` and the line
/// beginning with `Time`, parses each leniently, and combines them. The
/// first parseable occurrence of each marker wins.
///
/// # Errors
///
/// Returns an error if either marker line is absent or unparseable; the
/// caller must then skip the whole document.
pub fn resolve_timestamp(page: &str) -> Result<NaiveDateTime, TimestampError> {
    let mut date: Option<NaiveDate> = None;
    let mut time: Option<NaiveTime> = None;

    for line in page.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix("Date") {
            if date.is_none() {
                date = scan_date(rest);
            }
        } else if let Some(rest) = line.strip_prefix("Time") {
            if time.is_none() {
                time = scan_time(rest);
            }
        }
    }

    let date = date.ok_or(TimestampError::MissingDate)?;
    let time = time.ok_or(TimestampError::MissingTime)?;
    Ok(date.and_time(time))
}

/// Tries to find a calendar date anywhere in the given text.
///
/// Single tokens are tried before joined runs so `01-03-2024` wins over a
/// run that happens to absorb neighbouring label text.
fn scan_date(text: &str) -> Option<NaiveDate> {
    for window in token_windows(text, &[1, 2, 3]) {
        let candidate = window.join("-").replace(['/', '.'], "-");
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
                return Some(date);
            }
        }
    }
    None
}

/// Tries to find a clock time anywhere in the given text.
///
/// Two-token runs are tried first so `03:30 PM` is read as an AM/PM time
/// rather than as the bare 24-hour `03:30`.
fn scan_time(text: &str) -> Option<NaiveTime> {
    for window in token_windows(text, &[2, 1]) {
        let candidate = window.join(" ").to_uppercase();
        for format in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(&candidate, format) {
                return Some(time);
            }
        }
    }
    None
}

/// Yields contiguous runs of whitespace-separated tokens, one per requested
/// window size in the given order, left to right within each size.
fn token_windows<'a>(text: &'a str, sizes: &[usize]) -> Vec<Vec<&'a str>> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c == ':' || c == ','))
        .filter(|t| !t.is_empty())
        .collect();

    let mut windows = Vec::new();
    for &size in sizes {
        if size == 0 || size > tokens.len() {
            continue;
        }
        for start in 0..=tokens.len() - size {
            windows.push(tokens[start..start + size].to_vec());
        }
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn expected(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_resolve_numeric_day_first() {
        let page = "FOREX CARD RATES\nDate: 01-03-2024\nTime: 10:15";
        assert_eq!(
            resolve_timestamp(page).unwrap(),
            expected(2024, 3, 1, 10, 15)
        );
    }

    #[test]
    fn test_resolve_slashes_and_am_pm() {
        let page = "Date 05/02/2024\nTime 09:30 AM";
        assert_eq!(resolve_timestamp(page).unwrap(), expected(2024, 2, 5, 9, 30));
    }

    #[test]
    fn test_resolve_spelled_month() {
        let page = "Date : 01 March 2024\nTime : 10:15:42";
        // Seconds are parsed but the dataset key later truncates to minutes.
        let ts = resolve_timestamp(page).unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(ts.time(), NaiveTime::from_hms_opt(10, 15, 42).unwrap());
    }

    #[test]
    fn test_day_first_disambiguation() {
        // 03-04 must read as 3 April, not March 4th.
        let page = "Date: 03-04-2024\nTime: 12:00";
        assert_eq!(
            resolve_timestamp(page).unwrap(),
            expected(2024, 4, 3, 12, 0)
        );
    }

    #[test]
    fn test_pm_time_not_read_as_24_hour() {
        let page = "Date: 01-03-2024\nTime: 03:30 PM";
        assert_eq!(
            resolve_timestamp(page).unwrap(),
            expected(2024, 3, 1, 15, 30)
        );
    }

    #[test]
    fn test_missing_date_line() {
        let page = "FOREX CARD RATES\nTime: 10:15";
        assert_eq!(resolve_timestamp(page), Err(TimestampError::MissingDate));
    }

    #[test]
    fn test_missing_time_line() {
        let page = "Date: 01-03-2024\nSomething else";
        assert_eq!(resolve_timestamp(page), Err(TimestampError::MissingTime));
    }

    #[test]
    fn test_unparseable_date_is_missing() {
        let page = "Date: to be announced\nTime: 10:15";
        assert_eq!(resolve_timestamp(page), Err(TimestampError::MissingDate));
    }

    #[test]
    fn test_first_parseable_marker_wins() {
        let page = "Date: 01-03-2024\nTime: 10:15\nDate: 02-03-2024";
        assert_eq!(
            resolve_timestamp(page).unwrap(),
            expected(2024, 3, 1, 10, 15)
        );
    }
}
