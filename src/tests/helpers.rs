//! Test helper utilities for ports unit tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use crate::core_types::Port;
use crate::error::BoxError;
use crate::service::PortService;
use crate::storage::{MockPortStore, PortStore};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use std::sync::Arc;
use std::time::Duration;

/// A fully populated port record.
pub fn acapulco() -> Port {
    Port {
        id: "MXACA".to_string(),
        name: "Acapulco".to_string(),
        code: "20101".to_string(),
        city: "Acapulco".to_string(),
        province: "Guerrero".to_string(),
        country: "Mexico".to_string(),
        timezone: "America/Mexico_City".to_string(),
        unlocs: vec!["MXACA".to_string()],
        coords: vec![-99.87, 16.85],
        ..Port::default()
    }
}

/// JSON document for [`acapulco`], as a client would post it.
pub const ACAPULCO_JSON: &str = r#"{
    "id": "MXACA",
    "name": "Acapulco",
    "code": "20101",
    "city": "Acapulco",
    "province": "Guerrero",
    "country": "Mexico",
    "timezone": "America/Mexico_City",
    "unlocs": ["MXACA"],
    "coords": [-99.87, 16.85]
}"#;

/// Service backed by the given mock store.
pub fn service_with(store: MockPortStore) -> PortService {
    PortService::new(Arc::new(store))
}

/// Plain, unclassified error as a storage driver would return it.
pub fn driver_error(message: &str) -> BoxError {
    std::io::Error::other(message.to_string()).into()
}

/// Read a response body to a string.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    String::from_utf8(bytes.to_vec()).expect("response body should be UTF-8")
}

/// Build a request for the router.
pub fn request(method: &str, uri: &str, body: impl Into<Body>) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .expect("request should build")
}

/// Store that takes far longer than any request timeout used in tests.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl PortStore for SlowStore {
    async fn insert_port(&self, _port: Port) -> Result<(), BoxError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn find_port(&self, _port_id: &str) -> Result<Port, BoxError> {
        tokio::time::sleep(self.delay).await;
        Ok(acapulco())
    }
}
