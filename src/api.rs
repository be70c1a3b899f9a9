//! HTTP surface: submit a search, read history, read per-day trends.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::core::types::{SearchRequest, SearchResultDto, TrendPoint};
use crate::core::{AppState, SearchError};

const MIN_DAYS: u32 = 1;
const MAX_DAYS: u32 = 365;

fn default_days() -> u32 {
    30
}

/// Uniform response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            errors: None,
        }
    }

    fn error(message: &str, errors: String) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            errors: Some(errors),
        }
    }
}

fn status_for(err: &SearchError) -> StatusCode {
    match err {
        SearchError::Validation(_) => StatusCode::BAD_REQUEST,
        SearchError::Transport(_) | SearchError::EmptyResultSet => StatusCode::BAD_GATEWAY,
        SearchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure<T>(context: &str, err: SearchError) -> (StatusCode, Json<ApiResponse<T>>) {
    error!(%err, "{} failed", context);
    (
        status_for(&err),
        Json(ApiResponse::error(context, err.to_string())),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(search))
        .route("/api/search/history", get(history))
        .route("/api/search/trends/{term}", get(trends))
        .with_state(state)
}

async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> (StatusCode, Json<ApiResponse<SearchResultDto>>) {
    info!(term = %request.search_term, target = %request.target_url, "search requested");

    match state.search_service.run(&request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ApiResponse::ok(result, "search completed successfully")),
        ),
        Err(err) => failure("an error occurred while performing the search", err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryParams {
    search_term: Option<String>,
    #[serde(default = "default_days")]
    days: u32,
}

async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> (StatusCode, Json<ApiResponse<Vec<SearchResultDto>>>) {
    if let Err(err) = check_days(params.days) {
        return failure("invalid history request", err);
    }

    match state
        .search_service
        .history(params.search_term.as_deref(), params.days)
        .await
    {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::ok(records, "history retrieved successfully")),
        ),
        Err(err) => failure("an error occurred while retrieving search history", err),
    }
}

#[derive(Debug, Deserialize)]
struct TrendParams {
    #[serde(default = "default_days")]
    days: u32,
}

async fn trends(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Query(params): Query<TrendParams>,
) -> (StatusCode, Json<ApiResponse<Vec<TrendPoint>>>) {
    if term.trim().is_empty() {
        return failure(
            "invalid trends request",
            SearchError::Validation("search term is required".into()),
        );
    }
    if let Err(err) = check_days(params.days) {
        return failure("invalid trends request", err);
    }

    match state.search_service.trends(&term, params.days).await {
        Ok(points) => (
            StatusCode::OK,
            Json(ApiResponse::ok(points, "trends retrieved successfully")),
        ),
        Err(err) => failure("an error occurred while retrieving trends", err),
    }
}

fn check_days(days: u32) -> Result<(), SearchError> {
    if (MIN_DAYS..=MAX_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(SearchError::Validation(format!(
            "days must be between {} and {}",
            MIN_DAYS, MAX_DAYS
        )))
    }
}
