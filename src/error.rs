//! Classified errors for port operations.
//!
//! Every fault that crosses a layer boundary in this crate is, or wraps, a
//! [`PortsError`]: a machine-readable [`ErrorCode`], a human-readable message
//! and an optional cause. Upper layers branch on the code, never on message
//! text.
//!
//! # Error Codes
//!
//! | Code | Meaning | HTTP status | Retryable |
//! |------|---------|-------------|-----------|
//! | `invalid` | Caller supplied bad input | 400 | No |
//! | `missing` | Requested record does not exist | 404 | No |
//! | `internal` | Unexpected storage or system fault | 503 | Yes |
//!
//! # Classification Example
//!
//! ```rust
//! use ports::error::{is_code, ErrorCode, PortsError};
//!
//! let not_found = PortsError::not_found("port not found");
//! let wrapped = PortsError::internal("lookup failed").with_cause(not_found);
//!
//! // The chain is walked, so the inner code is still visible.
//! assert!(is_code(&wrapped, ErrorCode::NotFound));
//! assert!(is_code(&wrapped, ErrorCode::Internal));
//! assert!(!is_code(&wrapped, ErrorCode::Invalid));
//! ```

use crate::logging::{log_debug, log_error};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

/// Boxed error used for causes and for storage adapter failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Convenient result type for port operations.
pub type PortsResult<T> = std::result::Result<T, PortsError>;

/// Message returned to API callers for every internal or unclassified fault.
pub const INTERNAL_USER_MESSAGE: &str = "please try again later";

// ============================================================================
// Error codes
// ============================================================================

/// Machine-parseable error code.
///
/// The set is closed: a new code means a new variant, never a new string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCode {
    /// Unexpected failure.
    Internal,
    /// Invalid arguments or input.
    Invalid,
    /// Requested entity or record not found.
    #[serde(rename = "missing")]
    NotFound,
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Internal => "internal",
            ErrorCode::Invalid => "invalid",
            ErrorCode::NotFound => "missing",
        }
    }

    /// Whether a caller may reasonably retry an operation that failed with this code.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::Internal)
    }

    /// Get the severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::Internal => ErrorSeverity::Error,
            ErrorCode::Invalid | ErrorCode::NotFound => ErrorSeverity::Info,
        }
    }
}

/// Severity level for logging decisions.
///
/// Use [`ErrorCode::severity()`] to get the severity for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Operation failed for reasons outside the caller's control.
    ///
    /// Should be logged and investigated.
    Error,

    /// Expected failure (e.g., not found, validation error).
    ///
    /// Normal operation, log at debug level.
    Info,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PortsError
// ============================================================================

/// A classified error: code, message and optional cause.
///
/// Rendering always yields `(<code>) <effective message>`, where the effective
/// message is the message when non-empty, otherwise the rendered cause,
/// otherwise nothing.
///
/// # Creating Errors
///
/// [`PortsError::new`] is a pure constructor. The code-specific constructors
/// ([`invalid`](Self::invalid), [`not_found`](Self::not_found),
/// [`internal`](Self::internal)) also log the error at creation:
///
/// ```rust
/// use ports::error::{ErrorCode, PortsError};
///
/// let err = PortsError::new(ErrorCode::NotFound, "could not be found", None);
/// assert_eq!(err.to_string(), "(missing) could not be found");
///
/// let err = PortsError::invalid("port name should not be empty");
/// assert_eq!(err.code(), ErrorCode::Invalid);
/// ```
pub struct PortsError {
    code: ErrorCode,
    message: String,
    cause: Option<BoxError>,
}

impl PortsError {
    /// Create an error from its parts without logging.
    pub fn new(code: ErrorCode, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self {
            code,
            message: message.into(),
            cause,
        }
    }

    /// Create an `invalid` error (logs at DEBUG level).
    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        log_debug!(
            error_type = "invalid",
            message = %message,
            "Rejected invalid input"
        );
        Self::new(ErrorCode::Invalid, message, None)
    }

    /// Create a `missing` error (logs at DEBUG level).
    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        log_debug!(
            error_type = "missing",
            message = %message,
            "Requested record not found"
        );
        Self::new(ErrorCode::NotFound, message, None)
    }

    /// Create an `internal` error (logs at ERROR level).
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "internal",
            message = %message,
            "Unexpected failure"
        );
        Self::new(ErrorCode::Internal, message, None)
    }

    /// Attach the underlying cause.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if a cause was already set.
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        debug_assert!(self.cause.is_none(), "cause already set");
        self.cause = Some(cause.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The direct cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// True iff this error, or any error in its cause chain, is a
    /// `PortsError` with the same code as `target`. Only the code of
    /// `target` is compared.
    pub fn is(&self, target: &PortsError) -> bool {
        is_code(self, target.code)
    }

    /// Message that is safe to show to API callers.
    ///
    /// Invalid and not-found messages are passed through; anything internal is
    /// replaced by [`INTERNAL_USER_MESSAGE`].
    pub fn user_message(&self) -> &str {
        match self.code {
            ErrorCode::Internal => INTERNAL_USER_MESSAGE,
            ErrorCode::Invalid | ErrorCode::NotFound => &self.message,
        }
    }
}

impl fmt::Display for PortsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) ", self.code)?;
        if !self.message.is_empty() {
            f.write_str(&self.message)
        } else if let Some(cause) = &self.cause {
            write!(f, "{}", cause)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for PortsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("PortsError");
        debug.field("code", &self.code).field("message", &self.message);
        if let Some(cause) = &self.cause {
            debug.field("cause", cause);
        }
        debug.finish()
    }
}

impl StdError for PortsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// ============================================================================
// Chain inspection
// ============================================================================

/// Outcome of classifying an arbitrary error.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// The outermost `PortsError` found in the chain.
    Classified(&'a PortsError),
    /// No `PortsError` anywhere in the chain.
    Unclassified,
}

impl Classification<'_> {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Classification::Classified(err) => Some(err.code()),
            Classification::Unclassified => None,
        }
    }
}

/// Iterate over `err` and every error reachable through `source()`.
pub fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

/// True iff `err` or any error in its cause chain is a `PortsError` with `code`.
pub fn is_code(err: &(dyn StdError + 'static), code: ErrorCode) -> bool {
    chain(err).any(|e| {
        e.downcast_ref::<PortsError>()
            .is_some_and(|classified| classified.code == code)
    })
}

/// Find the outermost `PortsError` in the cause chain of `err`.
pub fn classify<'a>(err: &'a (dyn StdError + 'static)) -> Classification<'a> {
    chain(err)
        .find_map(|e| e.downcast_ref::<PortsError>())
        .map_or(Classification::Unclassified, Classification::Classified)
}

/// Find the outermost `PortsError` with `code` in the cause chain of `err`.
pub fn find_code<'a>(err: &'a (dyn StdError + 'static), code: ErrorCode) -> Option<&'a PortsError> {
    chain(err)
        .filter_map(|e| e.downcast_ref::<PortsError>())
        .find(|classified| classified.code == code)
}
