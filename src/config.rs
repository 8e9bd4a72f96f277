use crate::error::{PortsError, PortsResult};
use crate::logging::log_debug;
use std::net::SocketAddr;
use std::time::Duration;

/// Environment variable holding the HTTP listener address.
pub const ENV_HTTP_LISTEN_ADDR: &str = "PORTS_HTTP_LISTEN_ADDR";
/// Environment variable holding the request timeout, in whole seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PORTS_REQUEST_TIMEOUT_SECS";

const DEFAULT_HTTP_LISTEN_ADDR: &str = "0.0.0.0:80";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on, e.g. `0.0.0.0:8080`
    pub http_listen_addr: String,

    /// Maximum time spent handling a single request before it is answered
    /// with an internal error
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_listen_addr: DEFAULT_HTTP_LISTEN_ADDR.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` [`PortsError`] if:
    /// - `PORTS_REQUEST_TIMEOUT_SECS` is set but is not a whole number of seconds
    /// - The resulting configuration fails [`validate`](Self::validate)
    pub fn from_env() -> PortsResult<Self> {
        let config = Self::from_values(
            std::env::var(ENV_HTTP_LISTEN_ADDR).ok(),
            std::env::var(ENV_REQUEST_TIMEOUT_SECS).ok().as_deref(),
        )?;

        log_debug!(
            http_listen_addr = %config.http_listen_addr,
            request_timeout_secs = config.request_timeout.as_secs(),
            "Server configuration loaded from environment"
        );

        Ok(config)
    }

    /// Build configuration from optional raw values, validating once.
    ///
    /// `None` falls back to the default for that setting.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` [`PortsError`] if the timeout is not a whole
    /// number of seconds or the result fails [`validate`](Self::validate).
    pub fn from_values(
        http_listen_addr: Option<String>,
        request_timeout_secs: Option<&str>,
    ) -> PortsResult<Self> {
        let mut config = Self::default();
        if let Some(addr) = http_listen_addr {
            config.http_listen_addr = addr;
        }
        if let Some(secs) = request_timeout_secs {
            config.request_timeout = parse_timeout_secs(secs)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration is complete
    ///
    /// # Errors
    ///
    /// Returns an `invalid` [`PortsError`] if the listen address is not a
    /// socket address or the request timeout is zero.
    pub fn validate(&self) -> PortsResult<()> {
        self.socket_addr()?;
        if self.request_timeout.is_zero() {
            return Err(PortsError::invalid("request timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Parse the listen address.
    pub fn socket_addr(&self) -> PortsResult<SocketAddr> {
        self.http_listen_addr.parse::<SocketAddr>().map_err(|e| {
            PortsError::invalid(format!(
                "invalid HTTP listen address: {}",
                self.http_listen_addr
            ))
            .with_cause(e)
        })
    }
}

/// Parse a timeout given in whole seconds.
pub fn parse_timeout_secs(value: &str) -> PortsResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            PortsError::invalid(format!("invalid request timeout: {}", value)).with_cause(e)
        })
}
