//! Test helper utilities for ports integration tests
//!
//! This module provides a live server fixture shared across integration test
//! files.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use ports::{InMemoryStore, Port, PortService, Server, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<InMemoryStore>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<ports::PortsResult<()>>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory store.
    pub async fn start() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let service = PortService::new(store.clone());
        let config = ServerConfig {
            http_listen_addr: "127.0.0.1:0".to_string(),
            request_timeout: Duration::from_secs(5),
        };
        let server = Server::new(config, service);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind ephemeral port");
        let addr = listener.local_addr().expect("Listener should have an address");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_with_listener(listener, async {
            let _ = rx.await;
        }));

        Self {
            addr,
            store,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Signal shutdown and wait for the server to stop.
    pub async fn stop(mut self) -> ports::PortsResult<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.expect("Server task should not panic")
    }
}

/// A valid port record for requests.
pub fn ajman() -> Port {
    Port {
        id: "AEAJM".to_string(),
        name: "Ajman".to_string(),
        code: "52000".to_string(),
        city: "Ajman".to_string(),
        province: "Ajman".to_string(),
        country: "United Arab Emirates".to_string(),
        timezone: "Asia/Dubai".to_string(),
        unlocs: vec!["AEAJM".to_string()],
        coords: vec![55.5136433, 25.4052165],
        ..Port::default()
    }
}
