//! Database abstraction layer.
//!
//! Provides a trait-based interface for query execution so the harness can
//! run against the real SQLite database or an in-memory mock in tests.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use schema::{Column, ForeignKey, Schema, Table};
pub use sqlite::SqliteClient;
pub use types::{ResultSet, Row, Value};

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for database clients.
///
/// All operations are read-only: the evaluation corpus contains only
/// SELECT statements, and the client never retries, caches, or mutates.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Introspects the database schema, returning table and relationship
    /// information for the translation prompt.
    async fn introspect_schema(&self) -> Result<Schema>;

    /// Executes a single SQL statement and returns the results.
    ///
    /// Failure (malformed SQL, unknown table, timeout) is a first-class
    /// return value carrying the offending query text and the driver
    /// message; it never panics through to the caller.
    async fn execute_query(&self, sql: &str) -> Result<ResultSet>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}

/// Opens the SQLite database at the given path.
///
/// This is the only fatal failure point of a run: with no data source there
/// is nothing to evaluate.
pub async fn connect(path: &Path) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::connect(path).await?;
    Ok(Box::new(client))
}
