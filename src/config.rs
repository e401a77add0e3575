//! Configuration loading.
//!
//! Settings come from a TOML file (`sqleval.toml` by default), with CLI
//! flags taking precedence over it. A missing file is fine; every field
//! has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::oracle::OracleConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sqleval.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Result-comparison settings.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Run settings.
    #[serde(default)]
    pub suite: SuiteConfig,
}

/// LLM provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Provider name ("anthropic" or "mock").
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,
}

/// Run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// How many corpus cases one run evaluates.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_sample_size() -> usize {
    5
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
        }
    }
}

impl Config {
    /// Loads configuration from the given file.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error, since silently ignoring it would mask typos.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            EvalError::config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            EvalError::config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }
}
