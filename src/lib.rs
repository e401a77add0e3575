//! sqleval: an evaluation harness for natural-language-to-SQL translation.
//!
//! A run samples question/SQL pairs from a ground-truth corpus, asks an LLM
//! to translate each question into SQL against the introspected schema,
//! executes both queries against the database, and compares the two result
//! sets with a tiered equivalence oracle that tolerates cosmetic differences
//! (row order, column names, small numeric drift) while still rejecting
//! wrong answers.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod db;
pub mod error;
pub mod harness;
pub mod llm;
pub mod logging;
pub mod oracle;
pub mod report;

pub use error::{EvalError, Result};
