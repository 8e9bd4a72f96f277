//! Port entity and field validation
//!
//! Defines the `Port` record shared by storage adapters, the domain service
//! and the HTTP layer, along with the ordered checks a record must pass
//! before it is stored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geographic or shipping port.
///
/// Serialized with lowercase field names; list fields and `timezone` are
/// omitted from JSON when empty. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    /// Unique identifier for the port
    pub id: String,
    pub name: String,
    pub code: String,
    pub city: String,
    pub province: String,
    pub country: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    /// UN/LOCODEs for the port
    #[serde(alias = "UNLocs", skip_serializing_if = "Vec::is_empty")]
    pub unlocs: Vec<String>,
    /// Longitude, latitude
    #[serde(alias = "coordinates", skip_serializing_if = "Vec::is_empty")]
    pub coords: Vec<f64>,
}

/// Unexpected or unsupported values for `Port` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("port identifier should not be empty")]
    EmptyId,

    #[error("port name should not be empty")]
    EmptyName,

    #[error("port code should not be empty")]
    EmptyCode,
}

impl Port {
    /// Check required fields in order: identifier, then name, then code.
    ///
    /// Only the first failing field is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.code.is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(())
    }
}
