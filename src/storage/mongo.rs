//! MongoDB port storage
//!
//! Ports live in the `ports` collection of the database named by the
//! connection URI, one document per port, with a unique index on `id`.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use crate::core_types::Port;
use crate::error::{BoxError, PortsError, PortsResult};
use crate::logging::{log_debug, log_info};
use crate::storage::PortStore;

/// Environment variable holding the MongoDB connection URI.
pub const ENV_MONGODB_CONN_URI: &str = "PORTS_MONGODB_CONN_URI";

/// Connection URI used when none is configured.
pub const DEFAULT_MONGODB_CONN_URI: &str = "mongodb://localhost:27017/ports";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(4);
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(8);

const PORTS_COLLECTION: &str = "ports";
const PORT_ID_INDEX: &str = "id_1";

/// A port as stored in the `ports` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PortDocument {
    pub id: String,
    pub name: String,
    pub code: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub alias: Vec<String>,
    pub regions: Vec<String>,
    pub timezone: String,
    #[serde(rename = "UNLocs")]
    pub unlocs: Vec<String>,
    pub coords: Vec<f64>,
}

impl From<Port> for PortDocument {
    fn from(port: Port) -> Self {
        Self {
            id: port.id,
            name: port.name,
            code: port.code,
            city: port.city,
            province: port.province,
            country: port.country,
            alias: port.alias,
            regions: port.regions,
            timezone: port.timezone,
            unlocs: port.unlocs,
            coords: port.coords,
        }
    }
}

impl From<PortDocument> for Port {
    fn from(doc: PortDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            code: doc.code,
            city: doc.city,
            province: doc.province,
            country: doc.country,
            alias: doc.alias,
            regions: doc.regions,
            timezone: doc.timezone,
            unlocs: doc.unlocs,
            coords: doc.coords,
        }
    }
}

/// Turn the result of a lookup into a port, or a `missing` error when no
/// document matched.
pub(crate) fn port_or_missing(found: Option<PortDocument>) -> Result<Port, BoxError> {
    found
        .map(Port::from)
        .ok_or_else(|| PortsError::not_found("port not found").into())
}

/// Port records kept in a MongoDB database.
///
/// The driver maintains its own connection pool; the store can be shared
/// across tasks.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Create a client for the database named in `uri`.
    ///
    /// No connection is made here; use [`ping`](Self::ping) to verify the
    /// server is reachable.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` error if the URI does not parse or names no
    /// database, or an `internal` error if the client cannot be created.
    pub async fn open(uri: &str) -> PortsResult<Self> {
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            PortsError::invalid("invalid MongoDB connection URI").with_cause(e)
        })?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let Some(name) = options.default_database.clone() else {
            return Err(PortsError::invalid("MongoDB connection URI should name a database"));
        };

        let client = Client::with_options(options).map_err(|e| {
            PortsError::internal("could not create MongoDB client").with_cause(e)
        })?;
        let db = client.database(&name);

        log_debug!(database = %name, "MongoDB client created");
        Ok(Self { client, db })
    }

    /// Verify the server is reachable.
    pub async fn ping(&self) -> PortsResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| PortsError::internal("could not ping MongoDB").with_cause(e))
    }

    /// Create the unique port identifier index if missing, and return every
    /// index of the ports collection as `<database>.<collection>.<index>`.
    pub async fn create_indexes(&self) -> PortsResult<Vec<String>> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name(PORT_ID_INDEX.to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.ports().create_index(index).await.map_err(|e| {
            PortsError::internal(format!("could not create index {}", PORT_ID_INDEX)).with_cause(e)
        })?;

        let names = self
            .ports()
            .list_index_names()
            .await
            .map_err(|e| PortsError::internal("could not list indexes").with_cause(e))?;
        let indexes: Vec<String> = names
            .into_iter()
            .map(|name| format!("{}.{}.{}", self.db.name(), PORTS_COLLECTION, name))
            .collect();

        log_info!(indexes = ?indexes, "MongoDB indexes ready");
        Ok(indexes)
    }

    /// Disconnect, waiting for in-use connections to return to the pool.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
        log_debug!("MongoDB client closed");
    }

    fn ports(&self) -> Collection<PortDocument> {
        self.db.collection(PORTS_COLLECTION)
    }
}

#[async_trait]
impl PortStore for MongoStore {
    async fn insert_port(&self, port: Port) -> Result<(), BoxError> {
        let filter = doc! { "id": port.id.as_str() };
        self.ports()
            .replace_one(filter, PortDocument::from(port))
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn find_port(&self, port_id: &str) -> Result<Port, BoxError> {
        let found = self.ports().find_one(doc! { "id": port_id }).await?;
        port_or_missing(found)
    }
}
