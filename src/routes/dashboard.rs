use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::HubError;
use crate::payload::{DashboardPayload, build_dashboard_payload};
use crate::state::AppState;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/dashboard-data", get(api_dashboard_data))
        .route("/health", get(health))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Data-level gaps come back as `null` sections with `200`; only a failed
/// blocking task is an error.
async fn api_dashboard_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardPayload>, HubError> {
    let payload = tokio::task::spawn_blocking(move || {
        build_dashboard_payload(&state.config.data_dir, &state.profile)
    })
    .await?;
    Ok(Json(payload))
}
