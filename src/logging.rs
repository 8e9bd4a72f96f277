//! Logging utilities for ports
//!
//! Re-exports tracing macros with log_* naming convention for consistency.

// Re-export tracing macros with log_* naming
pub(crate) use tracing::debug as log_debug;
pub(crate) use tracing::error as log_error;
pub(crate) use tracing::info as log_info;
pub(crate) use tracing::warn as log_warn;

use tracing_subscriber::{fmt, EnvFilter};

/// Install a fmt subscriber honoring `RUST_LOG`, falling back to `default_directive`.
///
/// Returns true if a subscriber was installed by this call, false if one already existed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    fmt().with_env_filter(filter).try_init().is_ok()
}
