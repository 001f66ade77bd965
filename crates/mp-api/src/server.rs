//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use mp_core::Config;
use mp_meta::{GraphApi, WebhookHandler};

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub graph: Arc<GraphApi>,
    pub webhook: Arc<WebhookHandler>,
}

impl AppState {
    /// Build the Graph API client and webhook handler from configuration
    pub fn new(config: Config) -> crate::Result<Self> {
        let graph = Arc::new(GraphApi::new(&config.meta)?);
        let webhook = Arc::new(WebhookHandler::new(
            graph.clone(),
            graph.page_id(),
            config.triggers.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            graph,
            webhook,
        })
    }
}

/// Router with middleware and state attached
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP API server
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let port = config.server.port;
    let state = AppState::new(config)?;

    info!(
        "Serving page {} via Graph API {}",
        state.graph.page_id(),
        state.config.meta.api_version
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
