//! Domain service for port records.
//!
//! [`PortService`] validates input, delegates to a [`PortStore`] and
//! re-classifies whatever the store returns:
//!
//! | Situation | Returned error |
//! |-----------|----------------|
//! | Record fails validation | `invalid`, the validation message |
//! | Empty identifier on lookup | `invalid`, `identifier should not be empty` |
//! | Store insert fails | `internal`, `could not insert` |
//! | Store find reports `missing` | the store's error, unchanged |
//! | Store find fails otherwise | `internal`, `an unexpected error has occurred` |
//!
//! Store error text never reaches the message of an `internal` error; it is
//! only kept as the cause. Not-found messages are passed through because
//! they are safe to show to callers.

use crate::core_types::{Port, ValidationError};
use crate::error::{find_code, is_code, ErrorCode, PortsError, PortsResult};
use crate::logging::{log_debug, log_info};
use crate::storage::PortStore;
use std::sync::Arc;

pub const INSERT_FAILED_MESSAGE: &str = "could not insert";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "an unexpected error has occurred";
pub const EMPTY_IDENTIFIER_MESSAGE: &str = "identifier should not be empty";

/// Manages port records on top of a storage adapter.
#[derive(Clone)]
pub struct PortService {
    store: Arc<dyn PortStore>,
}

impl std::fmt::Debug for PortService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortService").finish_non_exhaustive()
    }
}

impl PortService {
    pub fn new(store: Arc<dyn PortStore>) -> Self {
        Self { store }
    }

    /// Validate and record port information.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` error if the identifier, name or code is empty
    /// (checked in that order), or an `internal` error if the store fails.
    pub async fn store_port(&self, port: Port) -> PortsResult<()> {
        if let Err(fault) = port.validate() {
            return Err(invalid_port(fault));
        }

        let port_id = port.id.clone();
        if let Err(err) = self.store.insert_port(port).await {
            return Err(PortsError::internal(INSERT_FAILED_MESSAGE).with_cause(err));
        }

        log_info!(port_id = %port_id, "Port stored");
        Ok(())
    }

    /// Retrieve port information by identifier.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` error for an empty identifier without touching the
    /// store, the store's own `missing` error when no record exists, or an
    /// `internal` error for any other store failure.
    pub async fn get_port_by_id(&self, port_id: &str) -> PortsResult<Port> {
        if port_id.is_empty() {
            return Err(
                PortsError::invalid(EMPTY_IDENTIFIER_MESSAGE).with_cause(ValidationError::EmptyId)
            );
        }

        match self.store.find_port(port_id).await {
            Ok(port) => {
                log_debug!(port_id = %port_id, "Port found");
                Ok(port)
            }
            Err(err) if is_code(err.as_ref(), ErrorCode::NotFound) => {
                Err(match err.downcast::<PortsError>() {
                    Ok(not_found) => *not_found,
                    // The classified error sits below a foreign wrapper: surface
                    // its message under the same code, keeping the whole chain.
                    Err(err) => {
                        let message = find_code(err.as_ref(), ErrorCode::NotFound)
                            .map(|e| e.message().to_string())
                            .unwrap_or_default();
                        PortsError::new(ErrorCode::NotFound, message, Some(err))
                    }
                })
            }
            Err(err) => Err(PortsError::internal(UNEXPECTED_ERROR_MESSAGE).with_cause(err)),
        }
    }
}

fn invalid_port(fault: ValidationError) -> PortsError {
    PortsError::invalid(fault.to_string()).with_cause(fault)
}
