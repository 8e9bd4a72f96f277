//! # ports
//!
//! HTTP API server for port records.
//!
//! Usage:
//!   ports [--http-listen-addr <addr>] [--request-timeout-secs <secs>]
//!
//! Each flag falls back to `PORTS_HTTP_LISTEN_ADDR` and
//! `PORTS_REQUEST_TIMEOUT_SECS`, then to defaults. Built with the `mongo`
//! feature, ports are kept in MongoDB (`--mongodb-conn-uri`,
//! `PORTS_MONGODB_CONN_URI`); otherwise they are kept in memory.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser};
use ports::config::{ENV_HTTP_LISTEN_ADDR, ENV_REQUEST_TIMEOUT_SECS};
use ports::logging::init_tracing;
use ports::{PortService, PortStore, PortsResult, Server, ServerConfig};

#[derive(Parser)]
#[command(name = "ports")]
#[command(version, about = "HTTP API for port records")]
struct Cli {
    /// Socket address for the HTTP server, e.g. 0.0.0.0:8080
    #[arg(long, env = ENV_HTTP_LISTEN_ADDR)]
    http_listen_addr: Option<String>,

    /// Seconds a single request may take before it is abandoned
    #[arg(long, env = ENV_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: Option<String>,

    #[command(flatten)]
    storage: StorageArgs,
}

#[cfg(feature = "mongo")]
#[derive(Args)]
struct StorageArgs {
    /// MongoDB connection URI, naming the database
    #[arg(
        long,
        env = ports::storage::mongo::ENV_MONGODB_CONN_URI,
        default_value = ports::storage::mongo::DEFAULT_MONGODB_CONN_URI
    )]
    mongodb_conn_uri: String,
}

#[cfg(not(feature = "mongo"))]
#[derive(Args)]
struct StorageArgs {}

impl Cli {
    fn server_config(&self) -> PortsResult<ServerConfig> {
        ServerConfig::from_values(
            self.http_listen_addr.clone(),
            self.request_timeout_secs.as_deref(),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let cli = Cli::parse();
    let config = cli.server_config().context("validating configuration")?;
    run(cli.storage, config).await
}

#[cfg(feature = "mongo")]
async fn run(storage: StorageArgs, config: ServerConfig) -> anyhow::Result<()> {
    use ports::MongoStore;

    let mongo = MongoStore::open(&storage.mongodb_conn_uri)
        .await
        .context("creating MongoDB client")?;
    mongo.ping().await.context("pinging MongoDB")?;
    mongo
        .create_indexes()
        .await
        .context("creating MongoDB indexes")?;

    let result = serve(config, Arc::new(mongo.clone())).await;
    mongo.close().await;
    result
}

#[cfg(not(feature = "mongo"))]
async fn run(_storage: StorageArgs, config: ServerConfig) -> anyhow::Result<()> {
    serve(config, Arc::new(ports::InMemoryStore::new())).await
}

async fn serve(config: ServerConfig, store: Arc<dyn PortStore>) -> anyhow::Result<()> {
    let server = Server::new(config, PortService::new(store));

    server
        .serve(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to listen for shutdown signal");
            }
        })
        .await
        .context("serving HTTP API")?;

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;

    fn clear_env() {
        std::env::remove_var(ENV_HTTP_LISTEN_ADDR);
        std::env::remove_var(ENV_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_flag_overrides_malformed_environment() {
        // Test verifies an unusable environment value does not abort startup
        // when a flag supplies the setting

        // Arrange
        clear_env();
        std::env::set_var(ENV_HTTP_LISTEN_ADDR, ":http");

        // Act
        let cli = Cli::try_parse_from(["ports", "--http-listen-addr", "127.0.0.1:8080"]).unwrap();
        let config = cli.server_config();

        // Assert
        assert_eq!(config.unwrap().http_listen_addr, "127.0.0.1:8080");

        // Cleanup
        clear_env();
    }

    #[test]
    #[serial]
    fn test_environment_used_when_flag_absent() {
        // Arrange
        clear_env();
        std::env::set_var(ENV_HTTP_LISTEN_ADDR, "127.0.0.1:9090");
        std::env::set_var(ENV_REQUEST_TIMEOUT_SECS, "7");

        // Act
        let config = Cli::try_parse_from(["ports"]).unwrap().server_config().unwrap();

        // Assert
        assert_eq!(config.http_listen_addr, "127.0.0.1:9090");
        assert_eq!(config.request_timeout, Duration::from_secs(7));

        // Cleanup
        clear_env();
    }

    #[test]
    #[serial]
    fn test_defaults_used_without_flags_or_environment() {
        // Arrange
        clear_env();

        // Act
        let config = Cli::try_parse_from(["ports"]).unwrap().server_config().unwrap();

        // Assert
        assert_eq!(config, ServerConfig::default());
    }
}
