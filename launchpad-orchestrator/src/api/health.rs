//! Health Check API Handlers
//!
//! Liveness and readiness probes for the hosting platform.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /liveness-check
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, "live\n")
}

/// GET /readiness-check
pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, "ready\n")
}
