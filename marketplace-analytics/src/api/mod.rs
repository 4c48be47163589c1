// marketplace-analytics/src/api/mod.rs
use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::analytics_service::AnalyticsService;
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<AnalyticsService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(analytics_service: Arc<AnalyticsService>, config: AppConfig) -> Self {
        Self {
            analytics_service,
            config: Arc::new(config),
        }
    }
}

/// ルーターとミドルウェアを組み立てる
pub fn create_app(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);
    let body_limit = app_state.config.body_limit_bytes;

    handlers::analytics_handler::analytics_router(app_state.clone())
        .merge(handlers::system_handler::system_router(app_state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_development() || config.cors_allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
