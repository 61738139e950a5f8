use std::future::Future;
use std::sync::Arc;

use casket_store::Storage;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Casket object server.
///
/// Owns the repository registry for the lifetime of the process. All state
/// is in memory and is dropped when the server stops.
pub struct CasketServer {
    config: ServerConfig,
    storage: Arc<Storage>,
}

impl CasketServer {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_storage(config, Arc::new(Storage::new()))
    }

    pub fn with_storage(config: ServerConfig, storage: Arc<Storage>) -> Self {
        Self { config, storage }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(Arc::clone(&self.storage), self.config.max_object_size);
        build_router(state, &self.config)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_with_shutdown(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("failed to listen for ctrl-c: {e}");
            }
        })
        .await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let addr = listener.local_addr()?;
        tracing::info!("Casket server listening on {addr}");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("Casket server on {addr} stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    #[test]
    fn server_construction() {
        let server = CasketServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8282".parse().unwrap());
        assert!(server.storage().is_empty().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = CasketServer::new(ServerConfig::default());
        let _router = server.router();
    }

    #[tokio::test]
    async fn serves_over_tcp_and_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = CasketServer::new(ServerConfig::default());
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_with_shutdown(listener, async {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /v1/health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8_lossy(&raw);
        assert!(text.starts_with("HTTP/1.1 200"), "unexpected response: {text}");
        assert!(text.contains("\"status\":\"ok\""));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
