//! LLM integration.
//!
//! Provides the trait and implementations for the natural-language-to-SQL
//! collaborator. The harness only ever sees the narrow
//! [`translator::SqlTranslator`] interface; providers are swappable behind
//! [`LlmClient`].

pub mod anthropic;
pub mod mock;
pub mod parser;
pub mod prompt;
pub mod translator;
pub mod types;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use mock::MockLlmClient;
pub use parser::{parse_response, ParsedResponse};
pub use translator::{Proposal, SqlTranslator};
pub use types::{Message, Role};

use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{EvalError, Result};

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) and must apply a
/// bounded timeout: a network call never blocks the suite indefinitely.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given messages.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Anthropic (Claude)
    #[default]
    Anthropic,
    /// Mock client for testing (no API key required)
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds a client for the given provider and model.
///
/// The Anthropic provider reads `ANTHROPIC_API_KEY` from the environment.
pub fn build_client(provider: LlmProvider, model: &str) -> Result<Box<dyn LlmClient>> {
    match provider {
        LlmProvider::Anthropic => {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .map_err(|_| EvalError::llm("ANTHROPIC_API_KEY environment variable not set"))?;
            let client = AnthropicClient::new(AnthropicConfig::new(api_key, model))?;
            Ok(Box::new(client))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
