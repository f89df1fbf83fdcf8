//! HTTP listener: bind, serve, and shut down gracefully.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::limit::GlobalConcurrencyLimitLayer;

use crate::types::ServerConfig;

/// HTTP server wrapping a router.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    addr: SocketAddr,
    cancel: CancellationToken,
    max_in_flight_requests: usize,
}

impl HttpServer {
    pub fn new(router: Router, addr: SocketAddr, config: &ServerConfig) -> Self {
        Self {
            router,
            addr,
            cancel: CancellationToken::new(),
            max_in_flight_requests: config.max_in_flight_requests.max(1),
        }
    }

    /// Bind the configured address and serve until shut down.
    pub async fn serve(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener until shut down.
    pub async fn serve_on(&self, listener: TcpListener) -> std::io::Result<()> {
        tracing::info!(
            "HTTP server listening on {} (max_in_flight_requests={})",
            listener.local_addr()?,
            self.max_in_flight_requests,
        );

        let app = self
            .router
            .clone()
            .layer(GlobalConcurrencyLimitLayer::new(self.max_in_flight_requests));
        let cancel = self.cancel.clone();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("HTTP server shutting down");
            })
            .await
    }

    /// Token that stops the server when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}
