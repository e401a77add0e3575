//! Result-equivalence oracle.
//!
//! Decides whether two independently produced result sets represent the same
//! answer to a natural-language question. The check is deliberately
//! order-insensitive and column-name-insensitive: a candidate query that
//! projects differently named or reordered columns can still be
//! correct-in-spirit. Small reference results are treated as samples rather
//! than exhaustive answers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::db::{ResultSet, Row, Value};

/// Tunable constants for the equivalence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Two numeric scalars match when their absolute difference is below this.
    #[serde(default = "default_epsilon")]
    pub numeric_epsilon: f64,

    /// Reference results with at most this many rows are treated as a sample:
    /// the candidate only needs to contain them, not match them exactly.
    #[serde(default = "default_sample_threshold")]
    pub sample_threshold: usize,
}

fn default_epsilon() -> f64 {
    0.01
}

fn default_sample_threshold() -> usize {
    5
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            numeric_epsilon: default_epsilon(),
            sample_threshold: default_sample_threshold(),
        }
    }
}

/// Compares a reference (ground truth) result set against a candidate.
///
/// Tiers, evaluated in order:
/// 1. Empty reference: the candidate must also be empty.
/// 2. Scalar reference (1 row x 1 column): compare against the candidate's
///    first cell only, with numeric tolerance.
/// 3. Single-column reference: distinct-value sets, subset containment for
///    small references, set equality otherwise.
/// 4. Multi-column reference: sets of full row tuples, same sample rule.
///
/// Always returns a definite boolean; malformed shapes (zero-width rows,
/// empty candidates) count as a mismatch, never an error.
pub fn results_match(config: &OracleConfig, reference: &ResultSet, candidate: &ResultSet) -> bool {
    if reference.rows.is_empty() {
        return candidate.rows.is_empty();
    }

    // Single aggregate answer: counts, averages, extrema.
    if reference.rows.len() == 1 && reference.columns.len() == 1 {
        let Some(expected) = reference.rows.first().and_then(|row| row.first()) else {
            return false;
        };
        let Some(actual) = candidate.rows.first().and_then(|row| row.first()) else {
            return false;
        };
        return scalar_matches(config, expected, actual);
    }

    let sampled = reference.rows.len() <= config.sample_threshold;

    if reference.columns.len() == 1 {
        let expected: HashSet<ValueKey> = reference
            .rows
            .iter()
            .filter_map(|row| row.first())
            .map(ValueKey::from)
            .collect();
        let actual: HashSet<ValueKey> = candidate
            .rows
            .iter()
            .filter_map(|row| row.first())
            .map(ValueKey::from)
            .collect();
        return if sampled {
            expected.is_subset(&actual)
        } else {
            expected == actual
        };
    }

    let expected: HashSet<Vec<ValueKey>> = reference.rows.iter().map(row_key).collect();
    let actual: HashSet<Vec<ValueKey>> = candidate.rows.iter().map(row_key).collect();
    if sampled {
        expected.is_subset(&actual)
    } else {
        expected == actual
    }
}

/// Scalar tier comparison: numeric tolerance when both sides are numeric,
/// exact equality otherwise.
fn scalar_matches(config: &OracleConfig, expected: &Value, actual: &Value) -> bool {
    match (as_numeric(expected), as_numeric(actual)) {
        (Some(a), Some(b)) => (a - b).abs() < config.numeric_epsilon,
        _ => ValueKey::from(expected) == ValueKey::from(actual),
    }
}

fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn row_key(row: &Row) -> Vec<ValueKey> {
    row.iter().map(ValueKey::from).collect()
}

/// Hashable canonical form of a `Value` for set membership.
///
/// `f64` is not `Hash`, and SQLite hands back whole-valued aggregates as
/// either INTEGER or REAL depending on the expression, so whole floats fold
/// into the integer key. Fractional floats use bit identity with `-0.0`
/// normalized to `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ValueKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(String),
}

impl From<&Value> for ValueKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Int(i) => Self::Int(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Self::Int(*f as i64)
                } else {
                    let normalized = if *f == 0.0 { 0.0 } else { *f };
                    Self::Float(normalized.to_bits())
                }
            }
            Value::Text(s) => Self::Text(s.clone()),
        }
    }
}
