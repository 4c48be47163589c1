// src/main.rs
use marketplace_analytics::api::{create_app, AppState};
use marketplace_analytics::config::AppConfig;
use marketplace_analytics::service::analytics_service::AnalyticsService;
use marketplace_analytics::service::snapshot_store::InMemorySnapshotStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_analytics=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting marketplace analytics server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", app_config);

    let store = Arc::new(InMemorySnapshotStore::new());
    let analytics_service = Arc::new(AnalyticsService::new(store));

    let server_addr = app_config.server_addr();
    let app_router = create_app(AppState::new(analytics_service, app_config));

    // サーバーの起動
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
