//! HTTP implementation of the stats feed

use super::{EventFeed, FeedError, FeedResult};
use crate::config::FeedConfig;
use crate::stats::DownloadEvent;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct DownloadsResponse {
    downloads: Vec<DownloadEvent>,
}

#[derive(Debug, Deserialize)]
struct EpisodesResponse {
    episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Deserialize)]
struct EpisodeEntry {
    id: String,
    #[serde(default)]
    title: Option<String>,
}

/// JSON-over-HTTP stats feed client with optional bearer auth.
pub struct HttpFeed {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpFeed {
    pub fn new(config: &FeedConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FeedResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Unavailable(format!(
                "{} returned {}",
                url, status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FeedError::Unavailable(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl EventFeed for HttpFeed {
    async fn fetch_events(&self) -> FeedResult<Vec<DownloadEvent>> {
        let body: DownloadsResponse = self.get_json("/downloads").await?;
        debug!("Fetched {} download events", body.downloads.len());
        Ok(body.downloads)
    }

    async fn fetch_titles(&self) -> FeedResult<HashMap<String, String>> {
        let body: EpisodesResponse = self.get_json("/episodes").await?;
        Ok(body
            .episodes
            .into_iter()
            .filter_map(|e| e.title.map(|title| (e.id, title)))
            .collect())
    }
}
