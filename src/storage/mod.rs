//! Storage adapters for port records
//!
//! The domain service only needs two capabilities from storage: insert a
//! record and find one by identifier. Any backend implementing [`PortStore`]
//! can be plugged in.

use crate::core_types::Port;
use crate::error::BoxError;
use async_trait::async_trait;

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

pub use memory::InMemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

/// Trait for port record storage backends
///
/// Adapters may return any error. The one contract is on `find_port`: when no
/// record exists for the identifier, the returned error must be classified
/// `missing` (see [`crate::error::is_code`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortStore: Send + Sync {
    /// Insert a record, replacing any existing record with the same identifier.
    async fn insert_port(&self, port: Port) -> Result<(), BoxError>;

    /// Retrieve the record with the given identifier.
    async fn find_port(&self, port_id: &str) -> Result<Port, BoxError>;
}
