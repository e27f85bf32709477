use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    pub server: ServerConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the download-stats feed, e.g. https://stats.example.com/v1
    pub base_url: String,
    /// Optional bearer token for the feed
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a computed report stays fresh per window
    pub report_ttl_secs: u64,
    pub max_entries: u64,
}

impl CacheConfig {
    const fn default_ttl_secs() -> u64 {
        300
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("STATS_FEED_URL").context("STATS_FEED_URL must be set")?;
        let api_key = std::env::var("STATS_FEED_API_KEY").ok();
        let timeout_secs = std::env::var("STATS_FEED_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let report_ttl_secs = std::env::var("REPORT_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(CacheConfig::default_ttl_secs);
        let max_entries = std::env::var("REPORT_CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(16);

        Ok(Config {
            feed: FeedConfig {
                base_url,
                api_key,
                timeout_secs,
            },
            server: ServerConfig { host, port },
            cache: CacheConfig {
                report_ttl_secs,
                max_entries,
            },
        })
    }
}
