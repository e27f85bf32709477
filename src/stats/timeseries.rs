//! Cumulative per-episode time series
//!
//! Buckets rows by UTC calendar date and walks the dates once, carrying a
//! running total per episode. Date derivation is always UTC so the output
//! does not depend on the host timezone.

use crate::stats::models::{DownloadEvent, TimeSeriesPoint};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Builds the day-ordered running-total series for every episode in `rows`.
///
/// Every point carries every episode observed anywhere in the row set,
/// seeded at 0 before its first download, and totals never decrease. Rows
/// without a timestamp or an item identity are skipped. The running totals
/// are carried forward date to date rather than recomputed per point, so
/// the walk is O(rows + dates × episodes).
pub fn cumulative_series(rows: &[DownloadEvent]) -> Vec<TimeSeriesPoint> {
    // (date, episode) -> downloads that day
    let mut daily: BTreeMap<NaiveDate, HashMap<String, u64>> = BTreeMap::new();
    let mut episodes: BTreeSet<String> = BTreeSet::new();

    for row in rows {
        let Some(ts) = row.timestamp else { continue };
        let Some(item) = row.item_key() else { continue };
        episodes.insert(item.to_string());
        *daily
            .entry(ts.date_naive())
            .or_default()
            .entry(item.to_string())
            .or_insert(0) += 1;
    }

    let mut running: BTreeMap<String, u64> =
        episodes.into_iter().map(|item| (item, 0)).collect();

    let mut points = Vec::with_capacity(daily.len());
    for (date, counts) in daily {
        for (item, count) in counts {
            *running.entry(item).or_insert(0) += count;
        }
        points.push(TimeSeriesPoint {
            date,
            totals: running.clone(),
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(date: (i32, u32, u32), hour: u32, episode: &str) -> DownloadEvent {
        DownloadEvent {
            timestamp: Some(
                Utc.with_ymd_and_hms(date.0, date.1, date.2, hour, 0, 0).unwrap(),
            ),
            episode_id: Some(episode.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn running_totals_accumulate_per_episode() {
        // Two A downloads on day one, one B download on day two
        let rows = vec![
            event((2024, 1, 1), 8, "A"),
            event((2024, 1, 1), 9, "A"),
            event((2024, 1, 2), 10, "B"),
        ];

        let series = cumulative_series(&rows);
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(series[0].totals["A"], 2);
        assert_eq!(series[0].totals["B"], 0);

        assert_eq!(series[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(series[1].totals["A"], 2);
        assert_eq!(series[1].totals["B"], 1);
    }

    #[test]
    fn every_point_carries_every_episode() {
        let rows = vec![
            event((2024, 2, 1), 0, "A"),
            event((2024, 2, 3), 0, "B"),
            event((2024, 2, 5), 0, "C"),
        ];

        let series = cumulative_series(&rows);
        assert_eq!(series.len(), 3);
        for point in &series {
            assert_eq!(point.totals.len(), 3, "gap in series at {}", point.date);
        }
        // B is present at 0 before its first download
        assert_eq!(series[0].totals["B"], 0);
        assert_eq!(series[0].totals["C"], 0);
    }

    #[test]
    fn totals_are_monotonically_non_decreasing() {
        let rows = vec![
            event((2024, 3, 1), 1, "A"),
            event((2024, 3, 2), 2, "B"),
            event((2024, 3, 2), 3, "A"),
            event((2024, 3, 4), 4, "B"),
            event((2024, 3, 7), 5, "A"),
        ];

        let series = cumulative_series(&rows);
        for pair in series.windows(2) {
            for (item, total) in &pair[0].totals {
                assert!(pair[1].totals[item] >= *total);
            }
        }
    }

    #[test]
    fn dates_bucket_in_utc() {
        // 23:30 UTC stays on its UTC date no matter the host timezone
        let rows = vec![
            event((2024, 4, 1), 23, "A"),
            event((2024, 4, 2), 0, "A"),
        ];

        let series = cumulative_series(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(series[1].date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    }

    #[test]
    fn rows_without_timestamp_or_item_are_skipped() {
        let rows = vec![
            DownloadEvent {
                episode_id: Some("A".to_string()),
                ..Default::default()
            },
            DownloadEvent {
                timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            },
            event((2024, 5, 1), 6, "A"),
        ];

        let series = cumulative_series(&rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].totals["A"], 1);
    }

    #[test]
    fn empty_rows_yield_empty_series() {
        assert!(cumulative_series(&[]).is_empty());
    }
}
