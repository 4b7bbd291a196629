//! # HTTP Server
//!
//! Combines the health and validation routers behind request tracing.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::ServiceConfig;
use super::health_routes::health_routes;
use super::validation_routes::{validation_routes, ValidationState};
use crate::pipeline::ValidationPipeline;

/// HTTP server for the validation API
pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server around an already wired pipeline
    pub fn new(config: ServiceConfig, pipeline: ValidationPipeline) -> Self {
        let router = Self::build_router(pipeline);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(pipeline: ValidationPipeline) -> Router {
        let validation_state = Arc::new(ValidationState::new(pipeline));

        Router::new()
            .merge(health_routes())
            .nest("/api/v1", validation_routes(validation_state))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(
            addr = %listener.local_addr()?,
            audit_log = %self.config.audit_log_path.display(),
            "validation API listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("validation API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
