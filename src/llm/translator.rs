//! The natural-language-to-SQL collaborator.
//!
//! `SqlTranslator` is the narrow interface the evaluation harness consumes:
//! one question in, one candidate SQL (plus optional reviewer feedback) out,
//! or a typed failure. Prompt construction, provider choice, and response
//! parsing all stay behind it.

use crate::corpus::TestCase;
use crate::db::Schema;
use crate::error::{EvalError, Result};
use crate::llm::{parser, prompt, LlmClient};

/// A candidate SQL query proposed by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// The proposed SQL.
    pub sql: String,
    /// Reviewer feedback comparing the proposal to the expected SQL, when
    /// the request was made in feedback mode and the model had something
    /// to say.
    pub feedback: Option<String>,
}

/// Translates natural-language questions to SQL via an LLM.
pub struct SqlTranslator {
    client: Box<dyn LlmClient>,
    schema: Schema,
    examples: Vec<TestCase>,
}

impl SqlTranslator {
    /// Creates a translator over the given client, schema, and few-shot
    /// example corpus.
    pub fn new(client: Box<dyn LlmClient>, schema: Schema, examples: Vec<TestCase>) -> Self {
        Self {
            client,
            schema,
            examples,
        }
    }

    /// Proposes SQL for the given question.
    ///
    /// With `expected_sql`, the prompt additionally asks the model to review
    /// its own query against the expected one (feedback mode). The case
    /// under evaluation is excluded from the few-shot examples so its
    /// reference SQL cannot leak into the prompt.
    pub async fn propose(&self, question: &str, expected_sql: Option<&str>) -> Result<Proposal> {
        let examples: Vec<TestCase> = self
            .examples
            .iter()
            .filter(|ex| ex.question != question)
            .cloned()
            .collect();

        let messages = prompt::build_messages(&self.schema, &examples, question, expected_sql);
        let response = self.client.complete(&messages).await?;
        let parsed = parser::parse_response(&response);

        let sql = parsed
            .sql
            .ok_or_else(|| EvalError::llm("Response contained no <sql_query> section"))?;

        Ok(Proposal {
            sql,
            feedback: parsed.feedback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;

    fn translator_with(client: MockLlmClient) -> SqlTranslator {
        SqlTranslator::new(Box::new(client), Schema::default(), Vec::new())
    }

    #[tokio::test]
    async fn test_propose_extracts_sql() {
        let translator = translator_with(MockLlmClient::new());
        let proposal = translator
            .propose("How many teams are there?", None)
            .await
            .unwrap();

        assert_eq!(proposal.sql, "SELECT COUNT(*) FROM team");
        assert_eq!(proposal.feedback, None);
    }

    #[tokio::test]
    async fn test_propose_carries_feedback() {
        let client = MockLlmClient::new().with_response(
            "expected_sql",
            "<sql_query>SELECT COUNT(*) FROM team</sql_query><feedback>Equivalent; the reference adds a redundant LIMIT 1.</feedback>",
        );
        let translator = translator_with(client);

        let proposal = translator
            .propose(
                "How many teams are there?",
                Some("SELECT COUNT(*) as team_count FROM team LIMIT 1"),
            )
            .await
            .unwrap();

        assert_eq!(proposal.sql, "SELECT COUNT(*) FROM team");
        assert!(proposal.feedback.unwrap().contains("Equivalent"));
    }

    #[tokio::test]
    async fn test_propose_fails_without_sql_section() {
        let client =
            MockLlmClient::new().with_response("impossible", "I cannot answer this question.");
        let translator = translator_with(client);

        let err = translator
            .propose("impossible question", None)
            .await
            .unwrap_err();

        assert!(matches!(err, EvalError::Llm(_)));
    }

    #[tokio::test]
    async fn test_propose_excludes_case_under_test_from_examples() {
        use crate::llm::types::Message;
        use std::sync::{Arc, Mutex};

        /// Records the prompt it was sent, then answers with a fixed query.
        struct RecordingClient {
            seen: Arc<Mutex<Vec<Message>>>,
        }

        #[async_trait::async_trait]
        impl crate::llm::LlmClient for RecordingClient {
            async fn complete(&self, messages: &[Message]) -> crate::error::Result<String> {
                self.seen.lock().unwrap().extend_from_slice(messages);
                Ok("<sql_query>SELECT 1</sql_query>".to_string())
            }
        }

        let case = TestCase {
            question: "How many teams are there?".to_string(),
            sql: "SELECT COUNT(*) as team_count FROM team LIMIT 1".to_string(),
            kind: None,
        };
        let other = TestCase {
            question: "List all teams from Texas.".to_string(),
            sql: "SELECT full_name FROM team WHERE state = 'Texas'".to_string(),
            kind: None,
        };

        let seen = Arc::new(Mutex::new(Vec::new()));
        let translator = SqlTranslator::new(
            Box::new(RecordingClient { seen: seen.clone() }),
            Schema::default(),
            vec![case.clone(), other],
        );

        translator.propose(&case.question, None).await.unwrap();

        let messages = seen.lock().unwrap();
        let user_prompt = &messages
            .iter()
            .find(|m| m.role == crate::llm::types::Role::User)
            .expect("user message")
            .content;

        // The other example appears; the case under test and its reference
        // SQL never leak into the prompt (outside the <query> tag itself).
        assert!(user_prompt.contains("List all teams from Texas."));
        assert!(!user_prompt.contains(&case.sql));
        assert!(user_prompt.contains("<query>How many teams are there?</query>"));
    }
}
