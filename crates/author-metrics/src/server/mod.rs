//! HTTP server for author lookups and analyses.

pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::dataset::DatasetStore;

/// Author metrics HTTP server.
pub struct AuthorMetricsServer {
    store: Arc<DatasetStore>,
    cors_origins: Vec<String>,
}

impl AuthorMetricsServer {
    /// Create a server over a loaded dataset snapshot.
    #[must_use]
    pub fn new(store: Arc<DatasetStore>, config: &Config) -> Self {
        Self { store, cors_origins: config.cors_origins.clone() }
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!(
            years = ?self.store.years(),
            rows = self.store.total_rows(),
            "Starting author metrics server on port {}",
            port
        );

        let router = transport::create_router(self.store, &self.cors_origins);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for AuthorMetricsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorMetricsServer").field("years", &self.store.years()).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
