mod config;
mod error;
mod prompt;
mod provider;
mod provider_perplexity;
mod routes_check;
mod routes_health;
mod state;

use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::provider::FactCheckProvider;
use crate::provider_perplexity::PerplexityProvider;
use crate::state::{AppState, SharedState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;
    if cfg.perplexity_api_key.is_none() {
        warn!("PERPLEXITY_API_KEY is not set; /check-news will answer 500");
    }

    let provider = PerplexityProvider::new(&cfg)?;
    let pinfo = provider.info();
    info!(provider = %pinfo.name, base_url = %pinfo.base_url, model = %pinfo.model, "provider: configured");

    let app_state = Arc::new(AppState::new(Box::new(provider)));
    let app = router(app_state);

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("verifier listening on http://{addr}");
    axum::serve(listener, app).await.context("server stopped")?;

    Ok(())
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(crate::routes_health::root))
        .route(newscheck::CHECK_NEWS_PATH, post(crate::routes_check::check_news))
        // Any origin may call in; the browser front end is served elsewhere.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
