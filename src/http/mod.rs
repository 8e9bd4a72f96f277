//! HTTP transport for the port service.
//!
//! Routes:
//! - `GET /alive`, `GET /ready` - health probes
//! - `GET /ports?portID=<id>` - retrieve a port
//! - `POST /ports` - store a port
//!
//! Errors from the service are translated by [`reply::reply_err`].

pub mod handlers;
pub mod reply;

use std::future::Future;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, routing::get, Router};
use tokio::net::TcpListener;
use tower::{timeout::TimeoutLayer, ServiceBuilder};

use crate::config::ServerConfig;
use crate::error::{PortsError, PortsResult};
use crate::logging::log_info;
use crate::service::PortService;

pub use reply::{reply, reply_err, ErrorResponse};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub ports: PortService,
}

/// Build the API router backed by `ports`.
pub fn create_router(ports: PortService, request_timeout: Duration) -> Router {
    Router::new()
        .route("/alive", get(handlers::alive))
        .route("/ready", get(handlers::ready))
        .route("/ports", get(handlers::get_port).post(handlers::store_port))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handlers::handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(AppState { ports })
}

/// HTTP server for the port API.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    router: Router,
}

impl Server {
    pub fn new(config: ServerConfig, ports: PortService) -> Self {
        let router = create_router(ports, config.request_timeout);
        Self { config, router }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured listen address.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` error if the address does not parse, or an
    /// `internal` error if the socket cannot be bound.
    pub async fn bind(&self) -> PortsResult<TcpListener> {
        let addr = self.config.socket_addr()?;
        TcpListener::bind(addr).await.map_err(|e| {
            PortsError::internal(format!("could not listen on {}", addr)).with_cause(e)
        })
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> PortsResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve_with_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// In-flight requests are allowed to complete before this returns.
    pub async fn serve_with_listener<F>(self, listener: TcpListener, shutdown: F) -> PortsResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            log_info!(addr = %addr, "Listening");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| PortsError::internal("server stopped unexpectedly").with_cause(e))?;

        log_info!("Server shut down");
        Ok(())
    }
}
