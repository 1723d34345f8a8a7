pub mod card;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod languages;
pub mod rank;
pub mod types;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use config::AppConfig;
use error::CardError;
use github::{GitHubClient, StatsSource};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Shared application state accessible to all request handlers.
pub struct AppState {
    /// Where the card's numbers come from.
    pub source: Arc<dyn StatsSource>,
    /// Application configuration loaded from environment variables.
    pub config: AppConfig,
}

impl AppState {
    /// Initializes the application state with a GitHub client built from the configured token.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = GitHubClient::new(config.github_token.clone())?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    pub fn with_source(config: AppConfig, source: Arc<dyn StatsSource>) -> Self {
        Self { source, config }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/stats", get(get_stats_card))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "stats-card",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_stats_card(State(state): State<Arc<AppState>>) -> Result<Response, CardError> {
    let svg = fetcher::fetch_and_render_card(state.source.as_ref(), &state.config).await?;

    Ok((
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, state.config.cache_control()),
        ],
        svg,
    )
        .into_response())
}
