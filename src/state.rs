use std::sync::Arc;

use crate::config::{HubConfig, TradingProfile};

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// Immutable after startup; handlers only read it.
pub struct AppState {
    pub config: HubConfig,
    pub profile: TradingProfile,
}

impl AppState {
    pub fn new(config: HubConfig, profile: TradingProfile) -> Arc<Self> {
        Arc::new(Self { config, profile })
    }
}
