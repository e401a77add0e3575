//! Mock LLM client for testing.
//!
//! Returns canned responses based on input patterns, without network calls.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::types::{Message, Role};
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses based on input patterns.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response), checked in order.
    custom_responses: Vec<(String, String)>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the last user message contains `pattern` (case-insensitive),
    /// the mock returns `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Generates a mock response based on the input.
    fn mock_response(&self, input: &str) -> String {
        let input_lower = input.to_lowercase();

        for (pattern, response) in &self.custom_responses {
            if input_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        if input_lower.contains("how many teams") {
            return "<answer><sql_query>SELECT COUNT(*) FROM team</sql_query></answer>"
                .to_string();
        }

        if input_lower.contains("teams from texas") {
            return "<answer><sql_query>SELECT full_name FROM team WHERE state = 'Texas'</sql_query></answer>"
                .to_string();
        }

        "<answer><sql_query>SELECT 1</sql_query></answer>".to_string()
    }

    /// Extracts the last user message content from a message list.
    fn extract_user_input(messages: &[Message]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let input = Self::extract_user_input(messages);
        Ok(self.mock_response(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counting_question() {
        let client = MockLlmClient::new();
        let messages = vec![Message::user("<query>How many teams are there?</query>")];

        let response = client.complete(&messages).await.unwrap();

        assert!(response.contains("SELECT COUNT(*) FROM team"));
    }

    #[tokio::test]
    async fn test_mock_default_response() {
        let client = MockLlmClient::new();
        let messages = vec![Message::user("something unrecognized")];

        let response = client.complete(&messages).await.unwrap();

        assert!(response.contains("<sql_query>"));
    }

    #[tokio::test]
    async fn test_mock_custom_response() {
        let client = MockLlmClient::new()
            .with_response("lowest scoring", "<sql_query>SELECT MIN(pts) FROM game</sql_query>");

        let messages = vec![Message::user("What's the lowest scoring game?")];
        let response = client.complete(&messages).await.unwrap();

        assert!(response.contains("SELECT MIN(pts) FROM game"));
    }

    #[tokio::test]
    async fn test_mock_case_insensitive() {
        let client = MockLlmClient::new();
        let messages = vec![Message::user("HOW MANY TEAMS?")];

        let response = client.complete(&messages).await.unwrap();

        assert!(response.contains("SELECT COUNT(*) FROM team"));
    }

    #[tokio::test]
    async fn test_mock_uses_last_user_message() {
        let client = MockLlmClient::new();
        let messages = vec![
            Message::system("irrelevant"),
            Message::user("teams from texas"),
            Message::assistant("<sql_query>SELECT 1</sql_query>"),
            Message::user("how many teams?"),
        ];

        let response = client.complete(&messages).await.unwrap();

        assert!(response.contains("SELECT COUNT(*) FROM team"));
    }
}
