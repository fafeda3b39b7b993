//! HTTP front door — the broker's two JSON endpoints.
//!
//! ```text
//! POST /compile  ExecutionRequest -> ExecutionResult   (judge::Dispatcher)
//! POST /chat     ChatRequest      -> ChatResult        (llm::AssistantRelay)
//! GET  /         {"status":"ok"}
//! ```
//!
//! Handlers share nothing mutable; the state is two `Arc`-backed
//! components cloned into each request task.

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use codebroker_config::BrokerConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::judge::client::{Judge0Client, JudgeError};
use crate::judge::{languages, Dispatcher};
use crate::llm::client::{GenerateClient, LlmError};
use crate::llm::AssistantRelay;

/// Errors while wiring the server from config.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build execution client: {0}")]
    Judge(#[from] JudgeError),

    #[error("failed to build generation client: {0}")]
    Llm(#[from] LlmError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub relay: AssistantRelay,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, relay: AssistantRelay) -> Self {
        Self { dispatcher, relay }
    }

    /// Build the production state: real HTTP clients for both backends.
    pub fn from_config(config: &BrokerConfig) -> Result<Self, ServerError> {
        let judge = Judge0Client::new(&config.judge)?;
        let generate = GenerateClient::new(&config.assistant)?;
        info!(
            judge = %config.judge.base_url,
            assistant = %config.assistant.base_url,
            model = generate.model(),
            languages = ?languages::supported(),
            "backends configured"
        );
        Ok(Self::new(
            Dispatcher::new(Arc::new(judge)),
            AssistantRelay::new(Arc::new(generate)),
        ))
    }
}

/// Build the router. CORS is permissive; the editor lives on another origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/compile", post(handlers::compile))
        .route("/chat", post(handlers::chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), ServerError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
