//! Time-window filtering of download events
//!
//! Windows are defined purely by an inclusive lower bound relative to a
//! caller-supplied "now". No upper bound is enforced: rows with future
//! timestamps (upstream clock skew) stay in, which matches the feed's
//! observed behavior.

use crate::stats::models::DownloadEvent;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

/// The four supported chart windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    Last7Days,
    Last30Days,
    Last90Days,
    /// From the first instant of the current calendar month (UTC)
    ThisMonth,
}

impl TimeWindow {
    /// Inclusive lower bound of the window relative to `now`.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeWindow::Last7Days => now - Duration::days(7),
            TimeWindow::Last30Days => now - Duration::days(30),
            TimeWindow::Last90Days => now - Duration::days(90),
            TimeWindow::ThisMonth => {
                // Day 1 exists in every month, so with_day(1) cannot fail here
                let first = now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive());
                first.and_time(NaiveTime::MIN).and_utc()
            }
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeWindow::Last7Days => "7d",
            TimeWindow::Last30Days => "30d",
            TimeWindow::Last90Days => "90d",
            TimeWindow::ThisMonth => "month",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeWindow::Last7Days),
            "30d" => Ok(TimeWindow::Last30Days),
            "90d" => Ok(TimeWindow::Last90Days),
            "month" => Ok(TimeWindow::ThisMonth),
            other => Err(format!(
                "unknown window '{}' (expected 7d, 30d, 90d or month)",
                other
            )),
        }
    }
}

/// Returns the rows whose timestamp falls inside the window.
///
/// Rows without a timestamp are excluded; they still count toward the
/// all-time total computed by the report assembly.
pub fn filter_window(
    rows: &[DownloadEvent],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<DownloadEvent> {
    let start = window.start(now);
    rows.iter()
        .filter(|row| row.timestamp.is_some_and(|ts| ts >= start))
        .cloned()
        .collect()
}
