//! Error types for sqleval.
//!
//! Defines the main error enum used throughout the evaluation harness.

use thiserror::Error;

/// Main error type for evaluation operations.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Database connection errors (missing file, locked database, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors. Carries the offending SQL so a failed
    /// candidate query can be reported alongside the driver message.
    #[error("Query error: {message}")]
    Execution { sql: String, message: String },

    /// LLM API errors (rate limits, auth, timeouts, malformed responses).
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration errors (invalid config file, bad corpus file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EvalError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an execution error for the given query.
    pub fn execution(sql: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Execution {
            sql: sql.into(),
            message: msg.into(),
        }
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Execution { .. } => "Query Error",
            Self::Llm(_) => "LLM Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using EvalError.
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection() {
        let err = EvalError::connection("Database file 'nba.sqlite' does not exist");
        assert_eq!(
            err.to_string(),
            "Connection error: Database file 'nba.sqlite' does not exist"
        );
        assert_eq!(err.category(), "Connection Error");
    }

    #[test]
    fn test_error_display_execution() {
        let err = EvalError::execution("SELECT * FROM tem", "no such table: tem");
        assert_eq!(err.to_string(), "Query error: no such table: tem");
        assert_eq!(err.category(), "Query Error");
    }

    #[test]
    fn test_execution_error_keeps_sql() {
        let err = EvalError::execution("SELECT * FROM tem", "no such table: tem");
        match err {
            EvalError::Execution { sql, message } => {
                assert_eq!(sql, "SELECT * FROM tem");
                assert_eq!(message, "no such table: tem");
            }
            _ => panic!("Expected Execution variant"),
        }
    }

    #[test]
    fn test_error_display_llm() {
        let err = EvalError::llm("Rate limited. Please wait.");
        assert_eq!(err.to_string(), "LLM error: Rate limited. Please wait.");
        assert_eq!(err.category(), "LLM Error");
    }

    #[test]
    fn test_error_display_config() {
        let err = EvalError::config("missing field 'model' in [llm]");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing field 'model' in [llm]"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EvalError>();
    }
}
