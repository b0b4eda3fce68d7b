//! Scan time windows.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building a window out of user input.
///
/// Both variants are input errors: callers surface them inline before
/// any scan is issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// The absolute time span a scan covers.
///
/// `start <= end` holds for every constructed window. Serializes as
/// ISO-8601 instants, which is what the scan endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window ending now and reaching the given number of days back.
    pub fn trailing_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Window from explicit dates, with the end day fully included.
    ///
    /// `start` becomes midnight of the start date and `end` the last
    /// second (23:59:59) of the end date, both UTC.
    pub fn from_dates(start_date: &str, end_date: &str) -> Result<Self, WindowError> {
        let start = parse_date(start_date)?
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_utc();
        let end = parse_date(end_date)?
            .and_hms_opt(23, 59, 59)
            .expect("23:59:59 is a valid time")
            .and_utc();

        if start > end {
            return Err(WindowError::InvalidRange { start, end });
        }

        Ok(Self { start, end })
    }
}

impl Default for TimeWindow {
    /// The trailing 30 days, used when no explicit dates are supplied.
    fn default() -> Self {
        Self::trailing_days(30)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, WindowError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| WindowError::InvalidDate(s.to_string()))
}
