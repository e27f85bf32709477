use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::feed::FeedError;
use crate::service::ReportService;
use crate::stats::{AggregateReport, TimeWindow};

pub struct AppState {
    pub reports: Arc<ReportService>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct ReportQuery {
    /// Chart window: 7d, 30d, 90d or month (default 30d)
    pub window: Option<String>,
}

/// Get the aggregate download report for a window
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<AggregateReport>, (StatusCode, Json<ErrorResponse>)> {
    let window = match query.window.as_deref() {
        None => TimeWindow::Last30Days,
        Some(raw) => raw.parse::<TimeWindow>().map_err(|e| {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e }))
        })?,
    };

    match state.reports.report(window).await {
        Ok(report) => Ok(Json((*report).clone())),
        Err(FeedError::Unavailable(reason)) => {
            tracing::error!("Stats feed unavailable: {}", reason);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Download data unavailable".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to build report: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to build report".to_string(),
                }),
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
