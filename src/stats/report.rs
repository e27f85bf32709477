//! Aggregate report assembly
//!
//! Ties the window filter, grouping engine and time-series builder together
//! into the single result entity served to the dashboard.

use crate::stats::grouping::{episode_stats, top_categories, unique_audience};
use crate::stats::models::{AggregateReport, DownloadEvent};
use crate::stats::timeseries::cumulative_series;
use crate::stats::window::{filter_window, TimeWindow};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Country and app lists are capped at this many entries; devices are not.
pub const TOP_CATEGORY_CAP: usize = 10;

/// Builds the full aggregate report for one requested chart window.
///
/// The breakdowns (episodes, categories, series, unique listeners) are
/// computed over the requested window. The three scalar counters are not:
/// `total_downloads` covers the whole row set (including rows without a
/// timestamp) and the 7/30-day counters always use their own fixed rolling
/// windows, whatever window the chart asked for.
///
/// Pure function of `(rows, titles, window, now)`; an empty row set yields
/// an all-zero, empty-sequence report rather than an error.
pub fn build_report(
    rows: &[DownloadEvent],
    titles: &HashMap<String, String>,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> AggregateReport {
    let windowed = filter_window(rows, window, now);
    let window_total = windowed.len() as u64;

    AggregateReport {
        total_downloads: rows.len() as u64,
        downloads_7_days: filter_window(rows, TimeWindow::Last7Days, now).len() as u64,
        downloads_30_days: filter_window(rows, TimeWindow::Last30Days, now).len() as u64,
        unique_listeners: unique_audience(&windowed),
        episodes: episode_stats(&windowed, titles),
        top_countries: top_categories(
            &windowed,
            window_total,
            Some(TOP_CATEGORY_CAP),
            DownloadEvent::country,
        ),
        top_apps: top_categories(
            &windowed,
            window_total,
            Some(TOP_CATEGORY_CAP),
            DownloadEvent::app,
        ),
        devices: top_categories(&windowed, window_total, None, DownloadEvent::device),
        downloads_over_time: cumulative_series(&windowed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn event(age_days: i64, episode: &str, device: &str) -> DownloadEvent {
        DownloadEvent {
            timestamp: Some(now() - Duration::days(age_days)),
            episode_id: Some(episode.to_string()),
            device_type: Some(device.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_rows_yield_well_formed_zero_report() {
        let report = build_report(&[], &HashMap::new(), TimeWindow::Last30Days, now());

        assert_eq!(report.total_downloads, 0);
        assert_eq!(report.downloads_7_days, 0);
        assert_eq!(report.downloads_30_days, 0);
        assert_eq!(report.unique_listeners, 0);
        assert!(report.episodes.is_empty());
        assert!(report.top_countries.is_empty());
        assert!(report.top_apps.is_empty());
        assert!(report.devices.is_empty());
        assert!(report.downloads_over_time.is_empty());
    }

    #[test]
    fn scalar_counters_ignore_the_requested_window() {
        let rows = vec![
            event(2, "ep-1", "phone"),   // inside 7d
            event(20, "ep-1", "phone"),  // inside 30d
            event(60, "ep-2", "desktop"),
        ];

        // Whatever window is requested, the fixed counters are identical
        for window in [
            TimeWindow::Last7Days,
            TimeWindow::Last30Days,
            TimeWindow::Last90Days,
            TimeWindow::ThisMonth,
        ] {
            let report = build_report(&rows, &HashMap::new(), window, now());
            assert_eq!(report.total_downloads, 3);
            assert_eq!(report.downloads_7_days, 1);
            assert_eq!(report.downloads_30_days, 2);
        }
    }

    #[test]
    fn total_downloads_includes_rows_without_timestamp() {
        let rows = vec![
            event(1, "ep-1", "phone"),
            DownloadEvent {
                episode_id: Some("ep-1".to_string()),
                ..Default::default()
            },
        ];

        let report = build_report(&rows, &HashMap::new(), TimeWindow::Last7Days, now());
        assert_eq!(report.total_downloads, 2);
        // The malformed row is excluded from everything windowed
        assert_eq!(report.downloads_7_days, 1);
        assert_eq!(report.episodes[0].downloads, 1);
    }

    #[test]
    fn breakdowns_follow_the_requested_window() {
        let rows = vec![event(2, "ep-1", "phone"), event(60, "ep-2", "desktop")];

        let narrow = build_report(&rows, &HashMap::new(), TimeWindow::Last7Days, now());
        assert_eq!(narrow.episodes.len(), 1);
        assert_eq!(narrow.downloads_over_time.len(), 1);

        let wide = build_report(&rows, &HashMap::new(), TimeWindow::Last90Days, now());
        assert_eq!(wide.episodes.len(), 2);
        assert_eq!(wide.downloads_over_time.len(), 2);
    }

    #[test]
    fn titles_decorate_episode_stats_only() {
        let rows = vec![event(1, "ep-1", "phone")];
        let titles = HashMap::from([("ep-1".to_string(), "Pilot".to_string())]);

        let report = build_report(&rows, &titles, TimeWindow::Last7Days, now());
        assert_eq!(report.episodes[0].title, "Pilot");
        // The time series keys stay raw episode ids
        assert!(report.downloads_over_time[0].totals.contains_key("ep-1"));
    }

    #[test]
    fn device_list_is_not_capped() {
        let mut rows = Vec::new();
        for i in 0..15 {
            rows.push(event(1, "ep-1", &format!("device-{}", i)));
        }

        let report = build_report(&rows, &HashMap::new(), TimeWindow::Last7Days, now());
        assert_eq!(report.devices.len(), 15);
        assert_eq!(report.top_countries.len(), 0);
    }

    #[test]
    fn report_is_idempotent() {
        let rows = vec![
            event(1, "ep-1", "phone"),
            event(3, "ep-2", "desktop"),
            event(5, "ep-1", "phone"),
        ];
        let titles = HashMap::from([("ep-2".to_string(), "Two".to_string())]);

        let a = build_report(&rows, &titles, TimeWindow::Last7Days, now());
        let b = build_report(&rows, &titles, TimeWindow::Last7Days, now());
        assert_eq!(a, b);
    }
}
