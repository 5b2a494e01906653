use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use booking_assistant::config::AppConfig;
use booking_assistant::db;
use booking_assistant::handlers;
use booking_assistant::services::ai::ollama::OllamaProvider;
use booking_assistant::services::ai::openai::{OpenAiCompatibleProvider, GROQ_BASE_URL};
use booking_assistant::services::ai::LlmProvider;
use booking_assistant::services::booking::client::BookingClient;
use booking_assistant::services::session::{
    MemorySessionStore, SessionLocks, SessionStore, SqliteSessionStore,
};
use booking_assistant::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let llm: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "groq" => {
            anyhow::ensure!(!config.groq_api_key.is_empty(), "GROQ_API_KEY must be set when LLM_PROVIDER=groq");
            tracing::info!("using Groq LLM provider (model: {})", config.groq_model);
            Box::new(OpenAiCompatibleProvider::new(
                "Groq",
                GROQ_BASE_URL.to_string(),
                config.groq_api_key.clone(),
                config.groq_model.clone(),
                config.extractor_timeout(),
            )?)
        }
        "ollama" => {
            tracing::info!("using Ollama LLM provider (url: {})", config.ollama_url);
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
                config.extractor_timeout(),
            )?)
        }
        _ => {
            anyhow::ensure!(!config.openai_api_key.is_empty(), "OPENAI_API_KEY must be set when LLM_PROVIDER=openai");
            tracing::info!("using OpenAI LLM provider (model: {})", config.openai_model);
            Box::new(OpenAiCompatibleProvider::new(
                "OpenAI",
                config.openai_base_url.clone(),
                config.openai_api_key.clone(),
                config.openai_model.clone(),
                config.extractor_timeout(),
            )?)
        }
    };

    let bookings = BookingClient::new(
        config.booking_api_base_url.clone(),
        config.bearer_token.clone(),
        config.restaurant_name.clone(),
        config.booking_timeout(),
    )?;
    tracing::info!(
        restaurant = bookings.restaurant_name(),
        base_url = %config.booking_api_base_url,
        "booking provider configured"
    );

    let sessions: Box<dyn SessionStore> = match config.session_store.as_str() {
        "sqlite" => {
            tracing::info!("storing dialogue state in {}", config.database_url);
            Box::new(SqliteSessionStore::new(db::init_db(&config.database_url)?))
        }
        _ => {
            tracing::warn!("storing dialogue state in memory; sessions are never evicted");
            Box::new(MemorySessionStore::new())
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        llm,
        bookings: Box::new(bookings),
        sessions,
        session_locks: SessionLocks::new(),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
