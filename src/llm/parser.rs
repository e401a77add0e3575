//! Response parsing for LLM outputs.
//!
//! The prompt asks the model to put its query in `<sql_query>` tags and any
//! reviewer commentary in `<feedback>` tags. Some models wrap SQL in a
//! markdown fence instead, so a ```sql block is accepted as a fallback.

use std::sync::OnceLock;

use regex::Regex;

/// Result of parsing an LLM response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedResponse {
    /// Extracted SQL query, if found.
    pub sql: Option<String>,
    /// Reviewer feedback on how the candidate compares to the expected SQL,
    /// if the model provided any.
    pub feedback: Option<String>,
}

fn sql_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<sql_query>\s*(.*?)\s*</sql_query>").expect("hardcoded regex")
    })
}

fn feedback_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<feedback>\s*(.*?)\s*</feedback>").expect("hardcoded regex")
    })
}

fn sql_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```sql\s*\n(.*?)```").expect("hardcoded regex"))
}

/// Parses an LLM response, extracting the SQL query and optional feedback.
///
/// Uses the first `<sql_query>` tag if present; otherwise falls back to the
/// first ```sql code block. Empty extractions count as absent.
pub fn parse_response(response: &str) -> ParsedResponse {
    let sql = sql_tag()
        .captures(response)
        .or_else(|| sql_fence().captures(response))
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());

    let feedback = feedback_tag()
        .captures(response)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());

    ParsedResponse { sql, feedback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sql_tag() {
        let response = "<thinking>need a count</thinking>\n<answer>\n<sql_query>SELECT COUNT(*) FROM team</sql_query>\n</answer>";
        let parsed = parse_response(response);
        assert_eq!(parsed.sql, Some("SELECT COUNT(*) FROM team".to_string()));
        assert_eq!(parsed.feedback, None);
    }

    #[test]
    fn test_extract_multiline_sql() {
        let response = "<sql_query>\nSELECT t.full_name\nFROM game g\nJOIN team t ON g.team_id_away = t.id\nGROUP BY t.id\n</sql_query>";
        let parsed = parse_response(response);
        let sql = parsed.sql.unwrap();
        assert!(sql.starts_with("SELECT t.full_name"));
        assert!(sql.ends_with("GROUP BY t.id"));
    }

    #[test]
    fn test_extract_feedback() {
        let response = "<sql_query>SELECT COUNT(*) FROM team</sql_query>\n<feedback>Both queries count teams; the LIMIT 1 is redundant but harmless.</feedback>";
        let parsed = parse_response(response);
        assert!(parsed.sql.is_some());
        assert_eq!(
            parsed.feedback.as_deref(),
            Some("Both queries count teams; the LIMIT 1 is redundant but harmless.")
        );
    }

    #[test]
    fn test_fenced_block_fallback() {
        let response = "Here is the query:\n```sql\nSELECT full_name FROM team;\n```\n";
        let parsed = parse_response(response);
        assert_eq!(parsed.sql, Some("SELECT full_name FROM team;".to_string()));
    }

    #[test]
    fn test_sql_tag_preferred_over_fence() {
        let response =
            "```sql\nSELECT 1;\n```\n<sql_query>SELECT full_name FROM team</sql_query>";
        let parsed = parse_response(response);
        assert_eq!(parsed.sql, Some("SELECT full_name FROM team".to_string()));
    }

    #[test]
    fn test_first_tag_wins() {
        let response =
            "<sql_query>SELECT 1</sql_query> or alternatively <sql_query>SELECT 2</sql_query>";
        let parsed = parse_response(response);
        assert_eq!(parsed.sql, Some("SELECT 1".to_string()));
    }

    #[test]
    fn test_no_sql_found() {
        let parsed = parse_response("I cannot answer that question with this schema.");
        assert_eq!(parsed.sql, None);
        assert_eq!(parsed.feedback, None);
    }

    #[test]
    fn test_empty_tag_counts_as_absent() {
        let parsed = parse_response("<sql_query>   </sql_query>");
        assert_eq!(parsed.sql, None);
    }

    #[test]
    fn test_other_language_fence_is_ignored() {
        let parsed = parse_response("```python\nprint('hi')\n```");
        assert_eq!(parsed.sql, None);
    }
}
