//! sqleval binary entry point.

use std::process;

use tracing::info;

use sqleval::cli::{self, Cli};
use sqleval::config::Config;
use sqleval::error::Result;
use sqleval::harness::{EvalHarness, SuiteSummary};
use sqleval::llm::{self, LlmProvider, SqlTranslator};
use sqleval::{corpus, db, logging, report};

#[tokio::main]
async fn main() {
    // Load .env file if present (for ANTHROPIC_API_KEY)
    dotenvy::dotenv().ok();

    logging::init();

    let cli = cli::parse_args();
    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", e.category(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_file(&cli.config_path())?;

    let provider: LlmProvider = cli
        .provider
        .as_deref()
        .unwrap_or(&config.llm.provider)
        .parse()
        .map_err(sqleval::EvalError::config)?;
    let model = cli.model.as_deref().unwrap_or(&config.llm.model);
    let sample_size = cli.sample.unwrap_or(config.suite.sample_size);

    let database = db::connect(&cli.database).await?;
    let schema = database.introspect_schema().await?;
    info!(
        tables = schema.tables.len(),
        database = %cli.database.display(),
        "connected"
    );

    let cases = corpus::load(&cli.corpus)?;
    info!(cases = cases.len(), corpus = %cli.corpus.display(), "corpus loaded");

    let client = llm::build_client(provider, model)?;
    let translator = SqlTranslator::new(client, schema, cases.clone());

    let selected = corpus::sample(&cases, sample_size, cli.seed);
    let harness = EvalHarness::new(database.as_ref(), &translator)
        .with_oracle(config.oracle)
        .with_feedback(cli.feedback);

    let mut summary = SuiteSummary::default();
    for (i, case) in selected.iter().enumerate() {
        let outcome = harness.run_case(case).await;
        report::print_case(i, &outcome, cli.quiet);
        if outcome.matched {
            summary.matched += 1;
        }
        summary.outcomes.push(outcome);
    }
    report::print_summary(&summary);

    database.close().await?;
    Ok(())
}
