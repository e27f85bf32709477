use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::service::ReportService;

use super::handlers::{get_report, health_check, AppState};

pub fn create_api_router(reports: Arc<ReportService>) -> Router {
    let state = Arc::new(AppState { reports });

    Router::new()
        .route("/health", get(health_check))
        .route("/api/report", get(get_report))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
