//! Response helpers and the error-to-status translation.

use crate::error::{
    chain, classify, Classification, ErrorCode, ErrorSeverity, PortsError, INTERNAL_USER_MESSAGE,
};
use crate::logging::{log_debug, log_error, log_warn};
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use std::error::Error as StdError;

/// Body delivered for every request that cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    fn unavailable() -> Self {
        Self {
            code: ErrorCode::Internal,
            message: INTERNAL_USER_MESSAGE.to_string(),
        }
    }
}

impl From<&PortsError> for ErrorResponse {
    fn from(err: &PortsError) -> Self {
        Self {
            code: err.code(),
            message: err.user_message().to_string(),
        }
    }
}

/// Reply with a status code and an optional JSON payload.
pub fn reply<T: Serialize>(status: StatusCode, payload: Option<&T>) -> Response {
    let body = match payload.map(serde_json::to_vec) {
        Some(Ok(bytes)) => Body::from(bytes),
        Some(Err(err)) => {
            log_error!(error = %err, "Failed to encode response body");
            Body::empty()
        }
        None => Body::empty(),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}

/// Translate an error into an HTTP reply.
///
/// `invalid` maps to 400 and `missing` to 404, both with the error's own code
/// and message. Internal and unclassified errors map to 503 with a generic
/// payload; their details are logged, never returned.
pub fn reply_err(err: &(dyn StdError + 'static)) -> Response {
    let (status, body) = match classify(err) {
        Classification::Classified(classified) => match classified.code() {
            ErrorCode::Invalid => (StatusCode::BAD_REQUEST, ErrorResponse::from(classified)),
            ErrorCode::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::from(classified)),
            ErrorCode::Internal => unavailable(err),
        },
        Classification::Unclassified => unavailable(err),
    };

    match body.code.severity() {
        ErrorSeverity::Error => log_warn!(
            status = status.as_u16(),
            code = %body.code,
            "Replying with error"
        ),
        ErrorSeverity::Info => log_debug!(
            status = status.as_u16(),
            code = %body.code,
            "Replying with error"
        ),
    }
    reply(status, Some(&body))
}

fn unavailable(err: &(dyn StdError + 'static)) -> (StatusCode, ErrorResponse) {
    let causes: Vec<String> = chain(err).map(ToString::to_string).collect();
    log_error!(
        error = %err,
        chain = ?causes,
        "Request failed with an internal error"
    );
    (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::unavailable())
}
