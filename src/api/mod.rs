//! HTTP layer exposing the historical summary endpoint.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::{lookup_host, TcpListener};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::Settings,
    llm::{Chain, ChatPromptTemplate, OllamaGenerator, PromptError, Role, TextGenerator},
};

pub const SERVICE_TITLE: &str = "Historical Summary API";

const HISTORY_TEMPLATE: &str = "Write me a historical overview of this city/place: {place}. The summary should not be too big just short summary in around 300-400 words. ";

#[derive(Clone)]
pub struct AppState {
    pub history_chain: Chain,
}

impl AppState {
    /// Wire the summary prompt to the given backend.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Result<Self, PromptError> {
        let prompt = ChatPromptTemplate::from_messages([(Role::Human, HISTORY_TEMPLATE)])?;
        Ok(Self {
            history_chain: Chain::new(prompt, generator),
        })
    }

    pub fn with_tracing(mut self, trace: bool) -> Self {
        self.history_chain = self.history_chain.with_tracing(trace);
        self
    }
}

/// Build the service router; split from [`serve`] so tests can drive it directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/history", post(routes::history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let generator = OllamaGenerator::from_settings(&settings)?;
    let state = AppState::new(Arc::new(generator))?.with_tracing(settings.trace_generations);
    let router = router(state);

    let addr: SocketAddr = lookup_host((host.as_str(), port))
        .await
        .with_context(|| format!("resolving {host}:{port}"))?
        .next()
        .with_context(|| format!("no address for {host}:{port}"))?;
    info!(
        %addr,
        title = SERVICE_TITLE,
        version = env!("CARGO_PKG_VERSION"),
        model = %settings.model,
        "serving historical summary API"
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!(error = %err, "ctrl-c handler unavailable; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
