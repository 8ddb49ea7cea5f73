use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use objd_store::{ObjectStore, RedbObjectStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::service::ObjectService;

/// objd HTTP server.
///
/// Owns the object store for its whole lifetime: the store is opened in
/// [`ObjdServer::open`] and released when `serve` returns.
pub struct ObjdServer {
    config: ServerConfig,
    service: ObjectService,
}

impl ObjdServer {
    /// Open the database named in `config` and build the server.
    ///
    /// Fails if the database stays locked past the configured timeout or
    /// cannot be opened at all.
    pub fn open(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let store = RedbObjectStore::open(&config.db_path, config.open_timeout())?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build a server over an already-open store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config,
            service: ObjectService::new(store),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.service.clone())
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `signal` completes, then drain in-flight
    /// requests.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, db = %self.config.db_path.display(), "objd server listening");

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        tracing::info!("objd server stopped");
        Ok(())
    }
}

/// Resolves on the first Ctrl-C, or SIGTERM on Unix.
///
/// If a handler cannot be installed that source is logged and ignored; the
/// server keeps running on the remaining one.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!(signal = "SIGINT", "draining connections"),
        () = terminate => tracing::info!(signal = "SIGTERM", "draining connections"),
    }
}
