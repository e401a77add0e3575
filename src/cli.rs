//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// Evaluates natural-language-to-SQL translation against a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "sqleval")]
#[command(version)]
#[command(about = "NL-to-SQL evaluation harness", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file.
    pub database: PathBuf,

    /// Path to the test corpus (JSON array of question/SQL pairs).
    #[arg(long, default_value = "ground_truth_data.json")]
    pub corpus: PathBuf,

    /// Number of cases to sample from the corpus. Overrides the config
    /// file; omit both to evaluate 5 cases.
    #[arg(short = 'n', long)]
    pub sample: Option<usize>,

    /// Seed for case sampling. Repeating a seed repeats the selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ask the model to review its query against the reference SQL.
    #[arg(long)]
    pub feedback: bool,

    /// LLM provider ("anthropic" or "mock"). Overrides the config file.
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier. Overrides the config file.
    #[arg(long)]
    pub model: Option<String>,

    /// Path to the config file (default: sqleval.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only print verdict lines and the summary.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// The config file path to load, explicit or default.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::config::DEFAULT_CONFIG_FILE))
    }
}

/// Parses command-line arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let cli = Cli::parse_from(["sqleval", "nba.sqlite"]);
        assert_eq!(cli.database, PathBuf::from("nba.sqlite"));
        assert_eq!(cli.corpus, PathBuf::from("ground_truth_data.json"));
        assert_eq!(cli.sample, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.feedback);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::parse_from([
            "sqleval",
            "nba.sqlite",
            "--corpus",
            "cases.json",
            "-n",
            "20",
            "--seed",
            "42",
            "--feedback",
            "--provider",
            "mock",
            "--model",
            "claude-3-5-sonnet-latest",
            "-q",
        ]);
        assert_eq!(cli.corpus, PathBuf::from("cases.json"));
        assert_eq!(cli.sample, Some(20));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.feedback);
        assert_eq!(cli.provider.as_deref(), Some("mock"));
        assert!(cli.quiet);
    }

    #[test]
    fn test_database_is_required() {
        assert!(Cli::try_parse_from(["sqleval"]).is_err());
    }

    #[test]
    fn test_config_path_default() {
        let cli = Cli::parse_from(["sqleval", "nba.sqlite"]);
        assert_eq!(cli.config_path(), PathBuf::from("sqleval.toml"));
    }

    #[test]
    fn test_config_path_explicit() {
        let cli = Cli::parse_from(["sqleval", "nba.sqlite", "--config", "custom.toml"]);
        assert_eq!(cli.config_path(), PathBuf::from("custom.toml"));
    }
}
