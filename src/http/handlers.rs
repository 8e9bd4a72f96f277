use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::StatusCode,
    response::Response,
};

use crate::core_types::Port;
use crate::error::{BoxError, PortsError};
use crate::http::reply::{reply, reply_err};
use crate::http::AppState;
use crate::logging::log_warn;

pub const DECODE_FAILED_MESSAGE: &str = "could not decode";

/// Name of the query parameter holding the port identifier
pub const PORT_ID_PARAM: &str = "portID";

/// First value of `portID` in the query pairs, or empty when absent.
pub fn port_id_param(params: &[(String, String)]) -> &str {
    params
        .iter()
        .find(|(key, _)| key == PORT_ID_PARAM)
        .map_or("", |(_, value)| value.as_str())
}

/// Retrieve a port by identifier: `GET /ports?portID=<id>`
///
/// Repeated `portID` parameters are allowed; the first one is used.
pub async fn get_port(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    match state.ports.get_port_by_id(port_id_param(&params)).await {
        Ok(port) => reply(StatusCode::OK, Some(&port)),
        Err(err) => reply_err(&err),
    }
}

/// Store a port from a JSON document: `POST /ports`
///
/// A body that cannot be read, including one over the body size limit, is
/// answered like a body that is not valid port JSON.
pub async fn store_port(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(err) => return reply_err(&PortsError::invalid(DECODE_FAILED_MESSAGE).with_cause(err)),
    };
    let port: Port = match serde_json::from_slice(&body) {
        Ok(port) => port,
        Err(err) => return reply_err(&PortsError::invalid(DECODE_FAILED_MESSAGE).with_cause(err)),
    };

    match state.ports.store_port(port).await {
        Ok(()) => reply::<()>(StatusCode::CREATED, None),
        Err(err) => reply_err(&err),
    }
}

/// Liveness probe.
pub async fn alive() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe. Always ready; it does not inspect storage.
pub async fn ready() -> StatusCode {
    StatusCode::OK
}

/// Answer requests that failed inside the middleware stack, such as timeouts.
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        log_warn!("Request timed out");
        return reply_err(&PortsError::internal("request timed out").with_cause(err));
    }
    reply_err(err.as_ref())
}
