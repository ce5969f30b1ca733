//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Deploy and price endpoints sit behind the cron guard; health probes do not.

pub mod deploy;
pub mod error;
pub mod guard;
pub mod health;
pub mod prices;

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/deploy-api-prod", get(deploy::deploy_api_prod))
        .route("/deploy-ui-prod", get(deploy::deploy_ui_prod))
        .route("/update-download-prices", get(prices::update_download_prices))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_prod_cron,
        ));

    Router::new()
        // Health checks
        .route("/liveness-check", get(health::liveness_check))
        .route("/readiness-check", get(health::readiness_check))
        .merge(guarded)
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
