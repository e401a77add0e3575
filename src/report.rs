//! Plain-text reporting for evaluation runs.
//!
//! Writes one block per case and a closing summary to stdout. Logging goes
//! to stderr, so report output stays pipeable.

use crate::db::ResultSet;
use crate::harness::{EvaluationOutcome, SuiteSummary};

/// Rows shown per result preview. Enough to eyeball a mismatch without
/// flooding the terminal on a thousand-row result.
const PREVIEW_ROWS: usize = 5;

/// Prints one case's outcome.
///
/// With `quiet`, only the verdict line is printed. Otherwise failing cases
/// additionally show both queries and result previews.
pub fn print_case(index: usize, outcome: &EvaluationOutcome, quiet: bool) {
    let verdict = if outcome.matched { "PASS" } else { "FAIL" };
    println!("[{:>3}] {} {}", index + 1, verdict, outcome.question);

    if quiet {
        return;
    }

    if let Some(note) = &outcome.note {
        println!("      note: {}", note);
    }

    if outcome.matched {
        return;
    }

    println!("      reference: {}", outcome.reference_sql);
    match &outcome.candidate_sql {
        Some(sql) => println!("      candidate: {}", sql),
        None => println!("      candidate: (none)"),
    }

    if let Some(result) = &outcome.reference_result {
        print_preview("reference results", result);
    }
    if let Some(result) = &outcome.candidate_result {
        print_preview("candidate results", result);
    }
}

/// Prints the closing summary for a run.
pub fn print_summary(summary: &SuiteSummary) {
    println!();
    match summary.pass_rate() {
        Some(rate) => println!(
            "{}/{} cases passed ({:.1}%)",
            summary.matched,
            summary.total(),
            rate * 100.0
        ),
        None => println!("No cases were evaluated."),
    }
}

fn print_preview(label: &str, result: &ResultSet) {
    println!(
        "      {} ({} row{}):",
        label,
        result.row_count(),
        if result.row_count() == 1 { "" } else { "s" }
    );
    if !result.columns.is_empty() {
        println!("        {}", result.columns.join(" | "));
    }
    for row in result.rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<String> = row.iter().map(|v| v.to_display_string()).collect();
        println!("        {}", cells.join(" | "));
    }
    if result.row_count() > PREVIEW_ROWS {
        println!("        ... {} more", result.row_count() - PREVIEW_ROWS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Value;

    // Smoke tests only: the functions print to stdout, so these just check
    // they do not panic on the awkward shapes.

    fn outcome(matched: bool) -> EvaluationOutcome {
        EvaluationOutcome {
            question: "How many teams are there?".to_string(),
            reference_sql: "SELECT COUNT(*) FROM team".to_string(),
            candidate_sql: Some("SELECT COUNT(*) FROM team".to_string()),
            matched,
            note: None,
            reference_result: Some(ResultSet::with_data(
                vec!["count".to_string()],
                vec![vec![Value::Int(30)]],
            )),
            candidate_result: Some(ResultSet::with_data(
                vec!["count".to_string()],
                vec![vec![Value::Int(29)]],
            )),
        }
    }

    #[test]
    fn test_print_case_pass() {
        print_case(0, &outcome(true), false);
    }

    #[test]
    fn test_print_case_fail_shows_details() {
        print_case(1, &outcome(false), false);
    }

    #[test]
    fn test_print_case_without_candidate() {
        let mut o = outcome(false);
        o.candidate_sql = None;
        o.candidate_result = None;
        print_case(2, &o, false);
    }

    #[test]
    fn test_print_large_preview_truncates() {
        let mut o = outcome(false);
        o.candidate_result = Some(ResultSet::with_data(
            vec!["id".to_string()],
            (0..20).map(|i| vec![Value::Int(i)]).collect(),
        ));
        print_case(3, &o, false);
    }

    #[test]
    fn test_print_summary_empty() {
        print_summary(&SuiteSummary::default());
    }
}
