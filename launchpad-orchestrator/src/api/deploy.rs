//! Deploy API Handlers
//!
//! The deploy runs on its own task: a caller that hangs up must not cut the
//! poll loop short or revoke the key while the deploy build still uses it.

use axum::{extract::State, http::StatusCode};

use crate::api::error::{ApiError, ApiResult};
use crate::service::deploy_service::{self, DeployTarget};
use crate::state::AppState;

/// GET /deploy-api-prod
/// Deploy the API with the production config
pub async fn deploy_api_prod(State(state): State<AppState>) -> ApiResult<StatusCode> {
    deploy(state, DeployTarget::API).await
}

/// GET /deploy-ui-prod
/// Deploy the UI
pub async fn deploy_ui_prod(State(state): State<AppState>) -> ApiResult<StatusCode> {
    deploy(state, DeployTarget::UI).await
}

async fn deploy(state: AppState, target: DeployTarget) -> ApiResult<StatusCode> {
    let task = tokio::spawn(async move { deploy_service::deploy(&state, target).await });

    let build = task.await.map_err(|e| {
        ApiError::Internal(format!("Deploy task of {} failed: {}", target.project, e))
    })??;

    tracing::info!(
        "Deploy of {} finished: build {} {:?}",
        target.project,
        build.build_num,
        build.outcome
    );

    Ok(StatusCode::NO_CONTENT)
}
