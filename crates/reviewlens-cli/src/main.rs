mod analyze;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use reviewlens_core::{AppConfig, ConfigError};
use reviewlens_sentiment::{AggregationPolicy, ClassifierBackend, SentimentAggregator};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reviewlens-cli")]
#[command(about = "Product review sentiment analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a JSON array of scraped reviews
    Analyze {
        /// Path to the reviews JSON file, or `-` for stdin
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Number of sample reviews to include in the report
        #[arg(long)]
        samples: Option<usize>,

        /// Maximum classifications in flight (overrides REVIEWLENS_CLASSIFY_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Classify a single piece of text
    Classify {
        /// Text to classify
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Markdown,
    Json,
}

const USAGE_HINT: &str = "reviewlens-cli: run `reviewlens-cli analyze <reviews.json>` or `--help`";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse(), || {
        dotenvy::dotenv().ok();
        reviewlens_core::load_app_config()
    })
    .await
}

/// Execute `cli`, loading configuration only when a command needs it.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    let Some(command) = cli.command else {
        println!("{USAGE_HINT}");
        return Ok(());
    };

    let config = load_config()?;

    // Logs go to stderr so JSON output on stdout stays parseable.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let backend = ClassifierBackend::from_config(&config).await?;
    let aggregator = SentimentAggregator::new(AggregationPolicy::from_config(&config));

    match command {
        Commands::Analyze {
            input,
            format,
            samples,
            concurrency,
        } => {
            let options = analyze::AnalyzeOptions {
                format,
                samples: samples.unwrap_or(config.sample_reviews),
                concurrency: concurrency.unwrap_or(config.classify_concurrency),
                max_reviews: config.max_reviews,
            };
            analyze::run_analyze(&aggregator, &backend, &input, &options).await?;
        }
        Commands::Classify { text } => analyze::run_classify(&backend, &text).await?,
    }

    Ok(())
}
