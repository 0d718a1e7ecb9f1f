mod ai;
mod catalog;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::{Assistant, LlmAiProvider};
use crate::catalog::CatalogService;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionRegistry;
use crate::state::AppState;
use crate::store::{DocumentStore, MemoryDocumentStore, RedisDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Nexus portal v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;

    // Initialize LLM client
    if config.anthropic_api_key.is_empty() {
        warn!("ANTHROPIC_API_KEY is not set; assistant calls will use fallbacks");
    }
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.ai_timeout)?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.ai_timeout
    );

    let provider = Arc::new(LlmAiProvider::new(llm));
    let assistant = Arc::new(Assistant::new(provider, config.ai_timeout));
    let catalog = Arc::new(CatalogService::new(store, assistant.clone()));

    let state = AppState {
        sessions: Arc::new(SessionRegistry::new(
            catalog,
            assistant,
            config.session_idle_ttl,
        )),
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

/// Redis when REDIS_URL is set, otherwise a process-local store that is lost
/// on restart.
async fn build_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisDocumentStore::connect(url, &config.store_namespace).await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("REDIS_URL is not set; using the in-memory document store");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}
