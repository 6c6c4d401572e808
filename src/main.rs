use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use resume_analyzer::config::AppConfig;
use resume_analyzer::routes::build_router;
use resume_analyzer::services::suggestions::{RigSuggestionModel, SuggestionRequester};
use resume_analyzer::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded (env: {})", std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()));

    let model = RigSuggestionModel::new(&config.llm).context("Failed to configure LLM provider")?;
    if config.llm.api_key.is_empty() {
        tracing::warn!("No LLM API key configured; suggestion requests will fail until APP__LLM__API_KEY is set");
    }
    tracing::info!("Suggestions via {}/{}", config.llm.provider, config.llm.model);

    let state = AppState::new(config.clone(), SuggestionRequester::new(Arc::new(model)));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
