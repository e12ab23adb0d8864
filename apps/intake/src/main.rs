mod config;
mod errors;
mod extract;
mod interview;
mod llm_client;
mod models;
mod routes;
mod sessions;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::questions::LlmQuestionGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sessions::SessionRegistry;
use crate::state::AppState;
use crate::storage::RecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intake service v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; an unusable backend means no session can run
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    if let Err(e) = llm.verify().await {
        error!("Model initialization error: {e}");
        error!("Possible issues: invalid API key, network connectivity problem, or API service disruption");
        return Err(anyhow::Error::new(e).context("generation backend is unavailable"));
    }
    info!("LLM client initialized (model: {})", llm.model());

    let generator = Arc::new(LlmQuestionGenerator::new(
        llm,
        config.prompt_style,
        config.max_questions,
    ));
    info!(
        "Question generation: style={}, max_questions={}",
        config.prompt_style, config.max_questions
    );

    let store = RecordStore::new(config.data_dir.clone());
    info!("Candidate records stored under {}", store.dir().display());

    // Build app state
    let state = AppState {
        sessions: SessionRegistry::new(),
        generator,
        store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the chat widget host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
