//! In-memory port storage

use crate::core_types::Port;
use crate::error::{BoxError, PortsError};
use crate::logging::log_debug;
use crate::storage::PortStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Port records kept in a map behind a single reader/writer lock.
///
/// Any number of lookups may proceed together; an insert excludes all other
/// access for the duration of the map update.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<HashMap<String, Port>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl PortStore for InMemoryStore {
    async fn insert_port(&self, port: Port) -> Result<(), BoxError> {
        log_debug!(port_id = %port.id, "Storing port in memory");
        self.data.write().await.insert(port.id.clone(), port);
        Ok(())
    }

    async fn find_port(&self, port_id: &str) -> Result<Port, BoxError> {
        let found = self.data.read().await.get(port_id).cloned();
        found.ok_or_else(|| PortsError::not_found("port not found").into())
    }
}
