//! Report construction with time-bounded memoization
//!
//! The aggregation itself is cheap, but each report needs a fresh pull of
//! the whole row set from the feed. Caching the finished report per window
//! lets the dashboard switch windows without hammering the upstream API.

use crate::feed::{EventFeed, FeedResult};
use crate::stats::{build_report, AggregateReport, TimeWindow};
use chrono::Utc;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct ReportService {
    feed: Arc<dyn EventFeed>,
    report_cache: Cache<TimeWindow, Arc<AggregateReport>>,
}

impl ReportService {
    pub fn new(feed: Arc<dyn EventFeed>, ttl_secs: u64, max_entries: u64) -> Self {
        let report_cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { feed, report_cache }
    }

    /// Returns the aggregate report for the window, rebuilding it from a
    /// fresh feed pull when the cached copy has expired.
    ///
    /// A single `now` is captured per rebuild so every grouping inside one
    /// report sees the same window boundaries.
    pub async fn report(&self, window: TimeWindow) -> FeedResult<Arc<AggregateReport>> {
        if let Some(cached) = self.report_cache.get(&window).await {
            debug!("Report cache hit for window {}", window);
            return Ok(cached);
        }

        let events = self.feed.fetch_events().await?;
        let titles = self.feed.fetch_titles().await?;
        debug!("Aggregating {} events for window {}", events.len(), window);

        let report = Arc::new(build_report(&events, &titles, window, Utc::now()));
        self.report_cache
            .insert(window, Arc::clone(&report))
            .await;

        Ok(report)
    }
}
