//! Prompt construction for the NL-to-SQL translation request.
//!
//! The system prompt carries the role, the database structure, and the
//! output contract. The user message carries few-shot examples, the
//! question, and (in feedback mode) the expected SQL for review.

use crate::corpus::TestCase;
use crate::db::Schema;
use crate::llm::types::Message;

/// Few-shot examples beyond this count add prompt cost without measurably
/// helping, so the list is capped.
const MAX_PROMPT_EXAMPLES: usize = 12;

const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are an AI assistant tasked with converting natural language questions about a database into SQL queries. You will be provided with the database schema to help you understand the structure of the data and formulate correct SQL queries.

<schema>
{schema}
</schema>

<key_relationships>
{relationships}
</key_relationships>

Please analyze each question and think through how to convert it into SQL. Consider the following:
1. Which table(s) in the schema are relevant to this question?
2. What columns need to be selected? Do not create new columns.
3. Are any aggregations or groupings required?
4. Are there any conditions that need to be applied (WHERE clause)?
5. Is there a limit on the number of results to return?

When you reply, first plan how you should answer within <thinking> </thinking> tags. This is a place to write down relevant content and will not be shown to the user.

Once you are done thinking, output your final answer within <answer> </answer> tags. Write your SQL query inside <sql_query> tags."#;

const FEEDBACK_INSTRUCTIONS: &str = r#"Now, let's compare your SQL query to the expected SQL query:

<expected_sql>
{expected_sql}
</expected_sql>

If the queries do not match, please provide feedback within <feedback></feedback> tags if the queries are similar, would return the same result, and have similar efficiency. If the queries match identically, no feedback is necessary."#;

/// Builds the system prompt with the schema injected.
pub fn build_system_prompt(schema: &Schema) -> String {
    SYSTEM_PROMPT_TEMPLATE
        .replace("{schema}", schema.format_for_llm().trim_end())
        .replace("{relationships}", schema.format_relationships().trim_end())
}

/// Builds the user message: few-shot examples, the question, and the
/// optional expected-SQL feedback section.
pub fn build_user_prompt(
    examples: &[TestCase],
    question: &str,
    expected_sql: Option<&str>,
) -> String {
    let mut prompt = String::new();

    if !examples.is_empty() {
        let shown = &examples[..examples.len().min(MAX_PROMPT_EXAMPLES)];
        let examples_json = serde_json::to_string_pretty(shown).unwrap_or_default();
        prompt.push_str("Here are some examples. Each has a \"natural_language\" field and a \"sql\" field.\n\n<example>\n");
        prompt.push_str(&examples_json);
        prompt.push_str("\n</example>\n\n");
    }

    prompt.push_str(&format!("<query>{question}</query>\n"));

    if let Some(expected) = expected_sql {
        prompt.push('\n');
        prompt.push_str(&FEEDBACK_INSTRUCTIONS.replace("{expected_sql}", expected));
        prompt.push('\n');
    }

    prompt
}

/// Builds the complete message list for one translation request.
pub fn build_messages(
    schema: &Schema,
    examples: &[TestCase],
    question: &str,
    expected_sql: Option<&str>,
) -> Vec<Message> {
    vec![
        Message::system(build_system_prompt(schema)),
        Message::user(build_user_prompt(examples, question, expected_sql)),
    ]
}
