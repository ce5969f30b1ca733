//! Price API Handler

use axum::{extract::State, http::StatusCode};

use crate::api::error::ApiResult;
use crate::service::pricing_service;
use crate::state::AppState;

/// GET /update-download-prices
/// Republish the download price table
pub async fn update_download_prices(State(state): State<AppState>) -> ApiResult<StatusCode> {
    pricing_service::update_download_prices(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}
