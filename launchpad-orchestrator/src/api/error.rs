//! API Error Handling
//!
//! Maps service failures to status codes and `{"error": {...}}` bodies.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::service::{DeployError, PricingError};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request did not come from the cron scheduler
    Unauthorized,
    /// Process is not running in the production project
    WrongEnvironment,
    /// The CI service rejected a submission; its status and body are relayed
    Upstream { status: u16, body: String },
    /// Deploy build did not finish in time
    Timeout { build_num: u64 },
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Unauthorized => (StatusCode::FORBIDDEN, json!({ "message": "unauthorized" })),
            ApiError::WrongEnvironment => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "This endpoint available only in prod" }),
            ),
            ApiError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({
                    "message": format!("Circle returned status code {}.", status),
                    "circleResponse": upstream_body(&body),
                }),
            ),
            ApiError::Timeout { build_num } => {
                tracing::error!("Timeout waiting for build {} to complete", build_num);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "message": "Timeout waiting for build to complete.",
                        "buildNumber": build_num,
                    }),
                )
            }
            ApiError::Internal(msg) => {
                // Detail only goes to the log
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        let body = json!({ "error": error });
        let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());

        (status, [(header::CONTENT_TYPE, "application/json")], text + "\n").into_response()
    }
}

/// Relay a JSON body as JSON, anything else as a string
fn upstream_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

impl From<DeployError> for ApiError {
    fn from(err: DeployError) -> Self {
        match err {
            DeployError::Upstream { status, body } => ApiError::Upstream { status, body },
            DeployError::Timeout { build_num } => ApiError::Timeout { build_num },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
