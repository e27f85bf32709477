//! Row acquisition from the remote download-stats feed
//!
//! The aggregation core never does I/O; everything it consumes comes
//! through the [`EventFeed`] trait. Upstream failures surface as a distinct
//! "data unavailable" error so callers can report them without the core
//! ever seeing a partial row set.

mod http;

pub use http::HttpFeed;

use crate::stats::DownloadEvent;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed could not be reached or returned an unusable response
    #[error("stats feed unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;

#[async_trait]
pub trait EventFeed: Send + Sync {
    /// Fetch the full set of download events for the catalog.
    async fn fetch_events(&self) -> FeedResult<Vec<DownloadEvent>>;

    /// Fetch the episode id → title lookup used to label per-episode stats.
    async fn fetch_titles(&self) -> FeedResult<HashMap<String, String>>;
}
