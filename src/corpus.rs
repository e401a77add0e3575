//! Ground-truth corpus loading.
//!
//! The corpus is a JSON array of `{natural_language, sql, type}` records:
//! a natural-language question, the hand-authored reference SQL taken as the
//! correct answer, and an informational category label.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// One evaluation unit from the ground-truth corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    /// The natural-language question.
    #[serde(rename = "natural_language")]
    pub question: String,

    /// The reference SQL taken as the correct answer.
    pub sql: String,

    /// Free-form category label ("counting", "ranking", ...). Informational
    /// only; the oracle never looks at it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Loads the corpus from a JSON file.
pub fn load(path: &Path) -> Result<Vec<TestCase>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        EvalError::config(format!("Failed to read corpus '{}': {e}", path.display()))
    })?;
    serde_json::from_str(&text).map_err(|e| {
        EvalError::config(format!("Failed to parse corpus '{}': {e}", path.display()))
    })
}

/// Selects up to `count` random cases from the corpus.
///
/// A seed gives reproducible runs; without one the selection differs per run.
pub fn sample(cases: &[TestCase], count: usize, seed: Option<u64>) -> Vec<TestCase> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut picked: Vec<TestCase> = cases.to_vec();
    picked.shuffle(&mut rng);
    picked.truncate(count.min(cases.len()));
    picked
}
