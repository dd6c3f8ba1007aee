mod config;
mod errors;
mod jsearch;
mod llm_client;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jsearch::JSearchClient;
use crate::llm_client::LlmClient;
use crate::resume::extractor::{FieldExtractor, HeuristicExtractor, LlmExtractor};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing RAPIDAPI_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Search API v{}", env!("CARGO_PKG_VERSION"));

    let jsearch = JSearchClient::new(&config)?;
    info!(
        "JSearch client initialized ({}, timeout {}s)",
        config.jsearch_base_url, config.upstream_timeout_secs
    );

    let extractor: Arc<dyn FieldExtractor> = match &config.anthropic_api_key {
        Some(key) => {
            info!("Résumé fields extracted by LLM (model: {})", llm_client::MODEL);
            Arc::new(LlmExtractor(LlmClient::new(key.clone())?))
        }
        None => {
            info!("Résumé fields extracted by heuristics (ANTHROPIC_API_KEY not set)");
            Arc::new(HeuristicExtractor)
        }
    };

    let state = AppState {
        config: config.clone(),
        jsearch,
        extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
