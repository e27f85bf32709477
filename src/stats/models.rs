//! Data models for download aggregation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observed download, as delivered by the stats feed.
///
/// Rows are immutable once ingested. Every categorical attribute is
/// optional; rows missing a given attribute are simply skipped by that
/// particular grouping. A row without a timestamp still counts toward the
/// all-time total but cannot be window-filtered or day-bucketed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadEvent {
    /// When the download happened
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Stable episode identity
    #[serde(default)]
    pub episode_id: Option<String>,

    /// Media file locator, used as the grouping identity when the feed
    /// omits an episode id
    #[serde(default)]
    pub enclosure_url: Option<String>,

    /// Client application label (e.g. "Overcast", "Apple Podcasts")
    #[serde(default)]
    pub agent_name: Option<String>,

    /// Device category (e.g. "phone", "desktop")
    #[serde(default)]
    pub device_type: Option<String>,

    /// ISO-like country code (e.g. "US", "DE")
    #[serde(default)]
    pub country_code: Option<String>,

    /// Privacy-preserving listener hash. Not reversible; hash collisions
    /// are accepted as the uniqueness heuristic.
    #[serde(default)]
    pub audience_hash: Option<String>,
}

impl DownloadEvent {
    /// Identity used for per-episode grouping, falling back to the
    /// enclosure URL for feeds that omit a stable episode id.
    pub fn item_key(&self) -> Option<&str> {
        non_empty(self.episode_id.as_deref()).or_else(|| non_empty(self.enclosure_url.as_deref()))
    }

    pub fn country(&self) -> Option<&str> {
        non_empty(self.country_code.as_deref())
    }

    pub fn app(&self) -> Option<&str> {
        non_empty(self.agent_name.as_deref())
    }

    pub fn device(&self) -> Option<&str> {
        non_empty(self.device_type.as_deref())
    }

    pub fn audience(&self) -> Option<&str> {
        non_empty(self.audience_hash.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One entry of a categorical top-N list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    /// The extracted grouping value (country code, app name, ...)
    pub key: String,
    pub count: u64,
    /// Share of the window total, 0 when the window is empty
    pub percentage: f64,
}

/// Per-episode download stats, decorated with the human-readable title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeStats {
    pub episode_id: String,
    /// Episode title, or the raw id when no title is known
    pub title: String,
    pub downloads: u64,
    /// Cardinality of the per-episode audience-hash set
    pub unique_listeners: u64,
}

/// One point of the cumulative per-episode series.
///
/// `totals` always carries every episode observed anywhere in the filtered
/// row set, including episodes that have not been downloaded yet as of this
/// date (value 0), so chart series have no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// UTC calendar date of the bucket
    pub date: NaiveDate,
    /// Episode id → cumulative download count as of this date
    pub totals: BTreeMap<String, u64>,
}

/// The complete derived analytics for one requested window.
///
/// `total_downloads`, `downloads_7_days` and `downloads_30_days` are always
/// computed from their own fixed bounds (all-time / 7 days / 30 days)
/// regardless of the window the chart breakdowns were requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub total_downloads: u64,
    pub downloads_7_days: u64,
    pub downloads_30_days: u64,
    /// Distinct audience hashes within the requested window
    pub unique_listeners: u64,
    /// Ordered by downloads descending, not capped
    pub episodes: Vec<EpisodeStats>,
    /// Top 10 countries by count descending
    pub top_countries: Vec<CategoryStat>,
    /// Top 10 client apps by count descending
    pub top_apps: Vec<CategoryStat>,
    /// All device categories by count descending, not capped
    pub devices: Vec<CategoryStat>,
    /// Day-ordered cumulative per-episode series
    pub downloads_over_time: Vec<TimeSeriesPoint>,
}
