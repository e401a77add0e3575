//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient`
//! trait using sqlx. The evaluation database is opened read-only; the only
//! side effect of any call is the read itself.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo, ValueRef};
use tracing::debug;

use crate::db::{Column, DatabaseClient, ForeignKey, ResultSet, Row, Schema, Table, Value};
use crate::error::{EvalError, Result};

/// Query timeout in seconds. A stuck query surfaces as an execution error
/// rather than hanging the suite.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// SQLite database client over a read-only connection pool.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Opens the database file at the given path, read-only.
    pub async fn connect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EvalError::connection(format!(
                "Database file '{}' does not exist",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new().filename(path).read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                EvalError::connection(format!("Failed to open '{}': {e}", path.display()))
            })?;

        debug!("Opened database {}", path.display());
        Ok(Self { pool })
    }

    /// Creates a client from an existing connection pool.
    ///
    /// This is primarily useful for testing against in-memory databases.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        let table_names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EvalError::connection(format!("Failed to list tables: {e}")))?;

        let mut tables = Vec::with_capacity(table_names.len());
        let mut foreign_keys = Vec::new();

        for table_name in table_names {
            tables.push(Table {
                columns: self.fetch_columns(&table_name).await?,
                name: table_name.clone(),
            });
            foreign_keys.extend(self.fetch_foreign_keys(&table_name).await?);
        }

        Ok(Schema {
            tables,
            foreign_keys,
        })
    }

    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        let start = Instant::now();

        let raw_rows = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            EvalError::execution(
                sql,
                format!("Query timed out after {QUERY_TIMEOUT_SECS} seconds"),
            )
        })?
        .map_err(|e| EvalError::execution(sql, format_query_error(&e)))?;

        let execution_time = start.elapsed();

        // Column names come verbatim from the result description. An empty
        // result carries no metadata; the oracle never looks at the columns
        // of an empty set, so that is acceptable.
        let columns: Vec<String> = raw_rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|col| col.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = raw_rows.iter().map(convert_row).collect();

        Ok(ResultSet {
            columns,
            rows,
            execution_time,
        })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

impl SqliteClient {
    /// Fetches column names and declared types for one table.
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<Column>> {
        let pragma = format!("PRAGMA table_info(\"{}\")", table_name.replace('"', "\"\""));
        let rows = sqlx::query(&pragma)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                EvalError::connection(format!("Failed to fetch columns for {table_name}: {e}"))
            })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get("name")
                .map_err(|e| EvalError::internal(format!("table_info decode: {e}")))?;
            let data_type: String = row
                .try_get("type")
                .map_err(|e| EvalError::internal(format!("table_info decode: {e}")))?;
            columns.push(Column::new(name, data_type));
        }
        Ok(columns)
    }

    /// Fetches the foreign keys declared on one table.
    async fn fetch_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKey>> {
        let pragma = format!(
            "PRAGMA foreign_key_list(\"{}\")",
            table_name.replace('"', "\"\"")
        );
        let rows = sqlx::query(&pragma)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                EvalError::connection(format!(
                    "Failed to fetch foreign keys for {table_name}: {e}"
                ))
            })?;

        let mut foreign_keys = Vec::with_capacity(rows.len());
        for row in rows {
            let to_table: String = row
                .try_get("table")
                .map_err(|e| EvalError::internal(format!("foreign_key_list decode: {e}")))?;
            let from_column: String = row
                .try_get("from")
                .map_err(|e| EvalError::internal(format!("foreign_key_list decode: {e}")))?;
            // "to" is NULL when the reference is to the implicit primary key.
            let to_column: Option<String> = row
                .try_get("to")
                .map_err(|e| EvalError::internal(format!("foreign_key_list decode: {e}")))?;
            foreign_keys.push(ForeignKey::new(
                table_name,
                from_column,
                to_table,
                to_column.unwrap_or_else(|| "id".to_string()),
            ));
        }
        Ok(foreign_keys)
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single cell from a SqliteRow to our Value type.
///
/// SQLite columns are dynamically typed, so the decision is made per cell
/// from the stored value's type, not from the declared column type.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) => {
            if raw.is_null() {
                return Value::Null;
            }
            raw.type_info().name().to_uppercase()
        }
        Err(_) => return Value::Null,
    };

    match type_name.as_str() {
        "BOOLEAN" | "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INTEGER" | "INT" | "INT4" | "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(|bytes| Value::Text(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null),

        // TEXT and everything else decodes as a string.
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}

/// Formats a query error from the driver.
fn format_query_error(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
