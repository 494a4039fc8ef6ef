//! Store configuration and connection setup.

use crate::error::Result;
use crate::schema::Schema;
use rusqlite::Connection;
use serde::Deserialize;

pub const DEFAULT_DB_PATH: &str = "tracker.db";
const IN_MEMORY: &str = ":memory:";

/// Parcel store configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Schema created when the connection is opened
    #[serde(skip, default = "Schema::parcel")]
    pub schema: Schema,
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl StoreConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            schema: Schema::parcel(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Open the database and make sure the schema exists
    pub fn open(&self) -> Result<Connection> {
        tracing::debug!(path = %self.db_path, "opening parcel database");
        let conn = if self.db_path == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(&self.db_path)?
        };
        self.schema.apply(&conn)?;
        Ok(conn)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
