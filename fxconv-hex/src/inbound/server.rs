//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fxconv_types::{Clock, RateFetcher};

use super::handlers::{self, AppState};
use crate::{ConversionService, HistoryService};

/// HTTP Server for the conversion API.
pub struct HttpServer<F: RateFetcher, C: Clock> {
    state: Arc<AppState<F, C>>,
}

impl<F: RateFetcher, C: Clock> HttpServer<F, C> {
    /// Creates a new HTTP server with the given service and an empty history.
    pub fn new(service: ConversionService<F, C>) -> Self {
        Self::with_history(service, HistoryService::new())
    }

    pub fn with_history(service: ConversionService<F, C>, history: HistoryService) -> Self {
        Self {
            state: Arc::new(AppState { service, history }),
        }
    }

    /// Shared state, for inspection after requests have been served.
    pub fn state(&self) -> Arc<AppState<F, C>> {
        self.state.clone()
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/api/convert", get(handlers::convert::<F, C>))
            .route("/api/rates", get(handlers::rates::<F, C>))
            .route("/api/currencies", get(handlers::currencies))
            .route(
                "/api/history",
                get(handlers::list_history::<F, C>).delete(handlers::clear_history::<F, C>),
            )
            .route("/api-docs/openapi.json", get(handlers::openapi))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);
        tracing::info!("  GET /api/convert?from=USD&to=BRL&amount=100");
        tracing::info!("  GET /api/rates?from=USD");
        tracing::info!("  GET /api/currencies");
        tracing::info!("  GET /health");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
