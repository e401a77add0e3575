//! The evaluation loop.
//!
//! For each test case: ask the translator for a candidate query, execute
//! both the reference and the candidate against the database, and hand the
//! two result sets to the oracle. One case failing (bad SQL, timeout, a
//! refusing model) records a failed outcome and the suite moves on; only
//! losing the database connection up front is fatal.

use tracing::{debug, info, warn};

use crate::corpus::TestCase;
use crate::db::{DatabaseClient, ResultSet};
use crate::error::EvalError;
use crate::llm::SqlTranslator;
use crate::oracle::{results_match, OracleConfig};

/// Outcome of evaluating a single test case.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    /// The natural-language question.
    pub question: String,
    /// The ground-truth SQL.
    pub reference_sql: String,
    /// The SQL the translator proposed, when translation succeeded.
    pub candidate_sql: Option<String>,
    /// Whether the candidate's results matched the reference's.
    pub matched: bool,
    /// Why the case failed, or the model's feedback on a passing case.
    pub note: Option<String>,
    /// Results of the reference query, when it executed.
    pub reference_result: Option<ResultSet>,
    /// Results of the candidate query, when it executed.
    pub candidate_result: Option<ResultSet>,
}

impl EvaluationOutcome {
    fn failed(case: &TestCase, note: impl Into<String>) -> Self {
        Self {
            question: case.question.clone(),
            reference_sql: case.sql.clone(),
            candidate_sql: None,
            matched: false,
            note: Some(note.into()),
            reference_result: None,
            candidate_result: None,
        }
    }
}

/// Aggregate results of one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct SuiteSummary {
    /// Per-case outcomes, in execution order.
    pub outcomes: Vec<EvaluationOutcome>,
    /// Number of cases whose results matched.
    pub matched: usize,
}

impl SuiteSummary {
    /// Total number of cases evaluated.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Fraction of cases that passed, or `None` for an empty run.
    ///
    /// An empty suite has no pass rate; reporting 0% or 100% would both
    /// mislead.
    pub fn pass_rate(&self) -> Option<f64> {
        if self.outcomes.is_empty() {
            None
        } else {
            Some(self.matched as f64 / self.outcomes.len() as f64)
        }
    }

    fn record(&mut self, outcome: EvaluationOutcome) {
        if outcome.matched {
            self.matched += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Runs test cases through translation, execution, and comparison.
pub struct EvalHarness<'a> {
    db: &'a dyn DatabaseClient,
    translator: &'a SqlTranslator,
    oracle: OracleConfig,
    /// When set, the prompt also asks the model to review its query against
    /// the reference SQL.
    feedback: bool,
}

impl<'a> EvalHarness<'a> {
    /// Creates a harness over the given database and translator.
    pub fn new(db: &'a dyn DatabaseClient, translator: &'a SqlTranslator) -> Self {
        Self {
            db,
            translator,
            oracle: OracleConfig::default(),
            feedback: false,
        }
    }

    /// Sets the oracle configuration.
    pub fn with_oracle(mut self, oracle: OracleConfig) -> Self {
        self.oracle = oracle;
        self
    }

    /// Enables feedback mode.
    pub fn with_feedback(mut self, feedback: bool) -> Self {
        self.feedback = feedback;
        self
    }

    /// Evaluates a single test case.
    ///
    /// Never returns an error: every failure mode becomes a failed outcome
    /// with a note saying which side broke.
    pub async fn run_case(&self, case: &TestCase) -> EvaluationOutcome {
        debug!(question = %case.question, "evaluating case");

        let expected_sql = self.feedback.then_some(case.sql.as_str());
        let proposal = match self.translator.propose(&case.question, expected_sql).await {
            Ok(proposal) => proposal,
            Err(e) => {
                warn!(question = %case.question, error = %e, "translation failed");
                return EvaluationOutcome::failed(case, format!("translation failed: {}", e));
            }
        };

        let reference_result = match self.db.execute_query(&case.sql).await {
            Ok(result) => result,
            Err(e) => {
                // A broken reference query is a corpus defect, worth
                // flagging louder than a model miss.
                warn!(question = %case.question, error = %e, "reference query failed");
                let mut outcome =
                    EvaluationOutcome::failed(case, format!("reference query failed: {}", e));
                outcome.candidate_sql = Some(proposal.sql);
                return outcome;
            }
        };

        let candidate_result = match self.db.execute_query(&proposal.sql).await {
            Ok(result) => result,
            Err(e) => {
                let mut outcome = EvaluationOutcome::failed(
                    case,
                    format!("candidate query failed: {}", query_failure_detail(&e)),
                );
                outcome.candidate_sql = Some(proposal.sql);
                outcome.reference_result = Some(reference_result);
                return outcome;
            }
        };

        let matched = results_match(&self.oracle, &reference_result, &candidate_result);

        EvaluationOutcome {
            question: case.question.clone(),
            reference_sql: case.sql.clone(),
            candidate_sql: Some(proposal.sql),
            matched,
            note: proposal.feedback,
            reference_result: Some(reference_result),
            candidate_result: Some(candidate_result),
        }
    }

    /// Evaluates a full suite sequentially, continuing past failed cases.
    pub async fn run_suite(&self, cases: &[TestCase]) -> SuiteSummary {
        info!(cases = cases.len(), "starting evaluation run");

        let mut summary = SuiteSummary::default();
        for case in cases {
            let outcome = self.run_case(case).await;
            summary.record(outcome);
        }

        info!(
            matched = summary.matched,
            total = summary.total(),
            "evaluation run complete"
        );
        summary
    }
}

fn query_failure_detail(error: &EvalError) -> String {
    match error {
        EvalError::Execution { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
