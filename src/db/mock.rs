//! Mock database clients for testing.
//!
//! `MockDatabaseClient` serves scripted result sets keyed on SQL substrings,
//! without touching a real database. `FailingDatabaseClient` fails every
//! query, for exercising error paths.

use async_trait::async_trait;

use crate::db::{Column, DatabaseClient, ResultSet, Schema, Table, Value};
use crate::error::{EvalError, Result};

/// Mock database client that returns scripted results.
///
/// Queries are matched against registered patterns (case-insensitive
/// substring, checked in registration order). Unmatched queries fall back
/// to an empty result set.
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseClient {
    schema: Schema,
    /// Scripted results (pattern -> result set).
    results: Vec<(String, ResultSet)>,
    /// Scripted failures (pattern -> error message).
    failures: Vec<(String, String)>,
}

impl MockDatabaseClient {
    /// Creates a mock client with an empty schema and no scripted results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client with a small basketball schema, enough for
    /// prompt-construction tests.
    pub fn with_sample_schema() -> Self {
        Self::new().with_schema(Schema {
            tables: vec![
                Table {
                    name: "team".to_string(),
                    columns: vec![
                        Column::new("id", "INTEGER"),
                        Column::new("full_name", "TEXT"),
                        Column::new("state", "TEXT"),
                    ],
                },
                Table {
                    name: "game".to_string(),
                    columns: vec![
                        Column::new("game_id", "TEXT"),
                        Column::new("team_id_home", "INTEGER"),
                        Column::new("pts_home", "REAL"),
                    ],
                },
            ],
            foreign_keys: vec![crate::db::ForeignKey::new(
                "game",
                "team_id_home",
                "team",
                "id",
            )],
        })
    }

    /// Sets the schema returned by introspection.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Scripts a result: queries containing `pattern` return `result`.
    pub fn with_result(mut self, pattern: impl Into<String>, result: ResultSet) -> Self {
        self.results.push((pattern.into(), result));
        self
    }

    /// Scripts a failure: queries containing `pattern` fail with `message`.
    pub fn with_failure(
        mut self,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failures.push((pattern.into(), message.into()));
        self
    }

    /// Convenience for scripting a single-cell result.
    pub fn with_scalar(self, pattern: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_result(
            pattern,
            ResultSet::with_data(vec!["value".to_string()], vec![vec![value.into()]]),
        )
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        let sql_lower = sql.to_lowercase();

        for (pattern, message) in &self.failures {
            if sql_lower.contains(&pattern.to_lowercase()) {
                return Err(EvalError::execution(sql, message.clone()));
            }
        }

        for (pattern, result) in &self.results {
            if sql_lower.contains(&pattern.to_lowercase()) {
                return Ok(result.clone());
            }
        }

        Ok(ResultSet::default())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Database client where every query fails.
#[derive(Debug, Clone, Default)]
pub struct FailingDatabaseClient;

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(Schema::default())
    }

    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        Err(EvalError::execution(sql, "simulated database failure"))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_result() {
        let client = MockDatabaseClient::new().with_scalar("COUNT(*)", 30i64);

        let result = client
            .execute_query("SELECT COUNT(*) FROM team")
            .await
            .unwrap();

        assert_eq!(result.rows, vec![vec![Value::Int(30)]]);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let client = MockDatabaseClient::new().with_failure("nonexistent", "no such table");

        let err = client
            .execute_query("SELECT * FROM nonexistent")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn test_failure_checked_before_result() {
        let client = MockDatabaseClient::new()
            .with_result("team", ResultSet::with_data(vec!["id".to_string()], vec![]))
            .with_failure("team", "locked");

        assert!(client.execute_query("SELECT * FROM team").await.is_err());
    }

    #[tokio::test]
    async fn test_unmatched_query_returns_empty() {
        let client = MockDatabaseClient::new();
        let result = client.execute_query("SELECT 1").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_sample_schema_introspection() {
        let client = MockDatabaseClient::with_sample_schema();
        let schema = client.introspect_schema().await.unwrap();

        assert_eq!(schema.tables.len(), 2);
        assert_eq!(schema.foreign_keys.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingDatabaseClient;
        assert!(client.execute_query("SELECT 1").await.is_err());
        assert!(client.introspect_schema().await.is_ok());
    }
}
