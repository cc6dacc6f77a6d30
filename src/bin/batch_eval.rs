use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use translate_backend::eval::{load_records, run_evaluation, ApiClient, DEFAULT_API_URL};

/// Send a dataset through the translation API and export results for scoring
#[derive(Debug, Parser)]
#[command(name = "batch_eval")]
struct Args {
    /// Translation API endpoint URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Path to test data JSON file
    #[arg(long, default_value = "performance-check-data/test.json")]
    test_file: PathBuf,

    /// Limit number of samples to test
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Skip API calls and use references as hypotheses
    #[arg(long)]
    no_api: bool,

    /// Output file for detailed results
    #[arg(long, default_value = "eval_results.json")]
    output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translate_backend=info,batch_eval=info")),
        )
        .init();

    let args = Args::parse();

    let records = load_records(&args.test_file, Some(args.limit))?;
    let client = if args.no_api {
        None
    } else {
        Some(ApiClient::new(args.api_url, args.timeout)?)
    };

    let report = run_evaluation(&records, client.as_ref()).await;
    println!("{}", report.summary());
    report.save(&args.output)?;

    Ok(())
}
