//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// BProC Daemon Server
pub struct Server {
    config: Arc<DaemonConfig>,
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        config.validate()?;
        let config = Arc::new(config);

        // Flipped on shutdown; cancels in-flight toolchain runs
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = AppState::new(config.clone(), shutdown_rx);

        Ok(Self {
            config,
            state,
            shutdown_tx,
        })
    }

    /// Router serving this server's state
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> DaemonResult<()> {
        let listener = TcpListener::bind(self.config.server.listen_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> DaemonResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!("BProC daemon listening on {}", addr);
        tracing::info!(
            "API prefix: {}, toolchain: {} {} (timeout {}s)",
            self.config.server.api_base(),
            self.config.toolchain.program,
            self.config.toolchain.entry_point,
            self.config.toolchain.timeout_secs
        );

        let shutdown_tx = self.shutdown_tx;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                // Running toolchains would otherwise hold the shutdown open
                shutdown_tx.send_replace(true);
            })
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("BProC daemon shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
