//! Cron Guard
//!
//! Deploy endpoints only accept requests from the App Engine cron scheduler,
//! and only while running in the production project.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Rejects requests without the cron header (403), then requests served
/// outside the production project (400)
pub async fn require_prod_cron(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let config = &state.config;

    let from_cron = request
        .headers()
        .get(config.cron_header.as_str())
        .is_some_and(|value| value.as_bytes() == config.cron_header_value.as_bytes());

    if !from_cron {
        tracing::debug!("Rejected {} without cron header", request.uri().path());
        return Err(ApiError::Unauthorized);
    }

    let project_id = state
        .keys
        .project_id()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to resolve project id: {}", e)))?;

    if project_id != config.production_project_id {
        tracing::debug!("Rejected {} in project {}", request.uri().path(), project_id);
        return Err(ApiError::WrongEnvironment);
    }

    Ok(next.run(request).await)
}
