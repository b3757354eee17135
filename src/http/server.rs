//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID + span, tracing, body limit)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::convert::{Converter, Downloader};
use crate::http::handler;
use crate::http::request::assign_request_id;
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build download client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the conversion endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let downloader = Downloader::new(&config.download)?;
        let state = AppState {
            converter: Arc::new(Converter::new(downloader, config.storage.work_dir.clone())),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request-ID middleware is outermost so every other layer, and the
    /// handler, runs inside the request span.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/xlsx2json", post(handler::xlsx_to_json))
            .route("/health", get(handler::health))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.listener.max_request_body_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(assign_request_id))
    }

    /// The router, for serving it elsewhere or driving it in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            work_dir = %self.config.storage.work_dir.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
