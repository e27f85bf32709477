use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use podlytics::api;
use podlytics::config::Config;
use podlytics::feed::{EventFeed, HttpFeed};
use podlytics::service::ReportService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");
    info!("Using stats feed: {}", config.feed.base_url);

    // Initialize the feed client and report service
    let feed: Arc<dyn EventFeed> = Arc::new(HttpFeed::new(&config.feed)?);
    let reports = Arc::new(ReportService::new(
        feed,
        config.cache.report_ttl_secs,
        config.cache.max_entries,
    ));
    info!(
        "Report cache TTL: {}s ({} entries max)",
        config.cache.report_ttl_secs, config.cache.max_entries
    );

    // Create router and serve
    let router = api::create_api_router(reports);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Stats API listening on http://{}", addr);
    info!("   - Report endpoint at http://{}/api/report", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
