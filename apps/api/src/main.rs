mod ai;
mod config;
mod errors;
mod llm_client;
mod models;
mod parsing;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::cache::{NullCache, RedisCache, ResponseCache};
use crate::ai::AiAssistant;
use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::parsing::ai::AiExtractor;
use crate::parsing::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the AI provider (optional)
    let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                &config.gemini_api_url,
                &config.gemini_model,
                Duration::from_secs(config.ai_timeout_secs),
                config.ai_max_retries,
            )?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set: AI extraction and suggestions are disabled");
            None
        }
    };

    // Initialize the suggestion cache (optional)
    let cache = build_cache(&config).await;

    let parser = ResumeParser::new(generator.clone().map(AiExtractor::new));
    let assistant = generator.map(|g| {
        Arc::new(AiAssistant::new(
            g,
            cache,
            Duration::from_secs(config.ai_cache_ttl_secs),
        ))
    });

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser: Arc::new(parser),
        assistant,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects to Redis when configured. An unreachable Redis disables caching
/// instead of failing startup.
async fn build_cache(config: &Config) -> Arc<dyn ResponseCache> {
    let Some(url) = &config.redis_url else {
        info!("REDIS_URL not set: AI response caching disabled");
        return Arc::new(NullCache);
    };
    match RedisCache::connect(url).await {
        Ok(cache) => {
            info!("Redis cache connected");
            Arc::new(cache)
        }
        Err(e) => {
            warn!("Redis unavailable, AI response caching disabled: {e}");
            Arc::new(NullCache)
        }
    }
}
