//! # ports
//!
//! HTTP service for storing and retrieving port records (geographic and
//! shipping ports) on top of a pluggable storage backend.
//!
//! ## Key Features
//!
//! - **Classified Errors**: every failure carries a machine-readable code
//!   (`invalid`, `missing`, `internal`) that survives wrapping
//! - **Pluggable Storage**: any [`PortStore`] can back the service
//! - **HTTP API**: axum router with health probes and consistent error bodies
//! - **Catalogue Loading**: streaming decoder for JSON port catalogues
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ports::{InMemoryStore, PortService, Server, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = PortService::new(Arc::new(InMemoryStore::new()));
//! let server = Server::new(ServerConfig::from_env()?, service);
//! server
//!     .serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod core_types;

pub mod logging;

pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::ServerConfig;
pub use core_types::{Port, ValidationError};
pub use error::{is_code, ErrorCode, ErrorSeverity, PortsError, PortsResult};
pub use http::{create_router, Server};
pub use loader::load_ports;
pub use service::PortService;
pub use storage::{InMemoryStore, PortStore};
#[cfg(feature = "mongo")]
pub use storage::MongoStore;
