use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::dto::common::ApiResponse;
use crate::{api::AppState, error::AppError};

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemInfoResponse {
    pub environment: String,
    pub version: String,
    pub is_production: bool,
    pub is_development: bool,
    pub tracked_actors: usize,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub async fn get_system_info(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<SystemInfoResponse>>, AppError> {
    let config = &app_state.config;
    let tracked_actors = app_state.analytics_service.actor_ids().await?.len();

    Ok(Json(ApiResponse::success(
        "System information retrieved",
        SystemInfoResponse {
            environment: config.environment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            is_production: config.is_production(),
            is_development: config.is_development(),
            tracked_actors,
        },
    )))
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .route("/system/info", get(get_system_info))
        .with_state(app_state)
}
