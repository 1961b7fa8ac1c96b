mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod placement;
mod quiz;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::GeminiClient;
use crate::quiz::store::{InMemoryQuizStore, QuizStore, RedisQuizStore};
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Placement API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Quiz session store
    let quiz_store: Arc<dyn QuizStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Quiz sessions stored in Redis");
            Arc::new(RedisQuizStore::new(client, config.session_ttl_secs))
        }
        None => {
            info!("REDIS_URL not set; quiz sessions kept in memory");
            Arc::new(InMemoryQuizStore::new(Duration::from_secs(
                config.session_ttl_secs,
            )))
        }
    };

    // Initialize AI gateway
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    );
    info!("AI gateway initialized (model: {})", gemini.model());

    let state = AppState {
        db,
        gateway: Arc::new(gemini),
        quiz_store,
        session_ttl_secs: config.session_ttl_secs,
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
