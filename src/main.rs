mod config;
mod error;
mod payload;
mod routes;
mod state;
mod telemetry;

use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::{HubConfig, TradingProfile};
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = HubConfig::from_env();

    let profile = match TradingProfile::load(&cfg) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to load trading profile: {e}");
            std::process::exit(1);
        }
    };
    match &cfg.profile_path {
        Some(path) => tracing::info!("Trading profile loaded from {}", path.display()),
        None => tracing::info!("Trading profile taken from environment"),
    }
    if !cfg.data_dir.is_dir() {
        tracing::warn!(
            "Data directory {} does not exist yet; sections will be null until the agents write it",
            cfg.data_dir.display()
        );
    }

    let addr: SocketAddr = match format!("{}:{}", cfg.bind, cfg.port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address {}:{}: {e}", cfg.bind, cfg.port);
            std::process::exit(1);
        }
    };
    let data_dir = cfg.data_dir.clone();

    let state = AppState::new(cfg, profile);

    let app = Router::new()
        .merge(routes::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!(
        "Trading dashboard listening on http://{addr} (data dir: {})",
        data_dir.display()
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully stopping…");
}
