//! Shared application state, routing, and the serve loop.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cache::DocumentCache;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::{download, health, preview, upload};

/// Allowance for multipart boundaries and part headers on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// State shared across all request handlers.
///
/// Cloning is cheap: the configuration is reference counted and the cache is
/// a handle onto a shared store.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    cache: DocumentCache,
}

impl AppState {
    /// Create state with a cache sized from `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc_server::config::ServerConfig;
    /// use featuredoc_server::server::AppState;
    ///
    /// let state = AppState::new(ServerConfig::default());
    /// assert_eq!(state.cache().entry_count(), 0);
    /// ```
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let cache = DocumentCache::from_config(&config);
        Self {
            config: Arc::new(config),
            cache,
        }
    }

    /// Access the active configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Access the document cache.
    #[must_use]
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }
}

/// Build the router exposing every endpoint.
///
/// The request body limit sits slightly above the upload limit so that
/// oversized files reach the upload handler and receive an explicit
/// `413 Payload Too Large` with a descriptive message.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config()
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/preview", post(preview))
        .route("/download/{file_id}", get(download))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve requests until a shutdown signal.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] when the address cannot be bound and
/// [`ServerError::Io`] when serving fails.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, version = env!("CARGO_PKG_VERSION"), "listening");

    let router = build_router(AppState::new(config));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn state_exposes_configuration() {
        let config = ServerConfig::default().with_cache_ttl(Duration::from_secs(5));
        let state = AppState::new(config.clone());
        assert_eq!(state.config(), &config);
    }

    #[test]
    fn clones_share_the_cache() {
        let state = AppState::new(ServerConfig::default());
        let clone = state.clone();
        assert_eq!(clone.cache().entry_count(), state.cache().entry_count());
    }
}
