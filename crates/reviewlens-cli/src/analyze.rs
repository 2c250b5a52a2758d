//! `analyze` and `classify` command handlers.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use reviewlens_core::Review;
use reviewlens_sentiment::{
    AggregateResult, AsyncClassifier, ChartData, ClassifierBackend, SentimentAggregator,
};

use crate::report::render_markdown;
use crate::OutputFormat;

#[derive(Debug, Clone)]
pub(crate) struct AnalyzeOptions {
    pub format: OutputFormat,
    pub samples: usize,
    pub concurrency: usize,
    pub max_reviews: usize,
}

/// Read, validate, classify, and print a batch of reviews.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if the
/// classifier is unavailable. Individual classification failures are
/// reported in the output, not returned.
pub(crate) async fn run_analyze(
    aggregator: &SentimentAggregator,
    classifier: &ClassifierBackend,
    input: &Path,
    options: &AnalyzeOptions,
) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let reviews = load_reviews(&raw, options.max_reviews)
        .with_context(|| format!("failed to load reviews from {}", input.display()))?;

    let result = aggregator
        .analyze_concurrent(classifier, &reviews, options.concurrency)
        .await?;

    println!("{}", render(&result, options)?);
    Ok(())
}

/// Classify one text and print the label.
///
/// # Errors
///
/// Returns an error if the classifier rejects the text or is unavailable.
pub(crate) async fn run_classify(classifier: &ClassifierBackend, text: &str) -> anyhow::Result<()> {
    let classification = classifier
        .classify_async(text)
        .await
        .context("classification failed")?;
    println!(
        "{} (confidence {:.2}) [{}]",
        classification.label,
        classification.confidence,
        classifier.model_name()
    );
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read reviews from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Parse scraped records and cap the batch at `max_reviews`.
fn load_reviews(raw: &str, max_reviews: usize) -> anyhow::Result<Vec<Review>> {
    let mut reviews = reviewlens_core::parse_reviews_json(raw)?;
    if reviews.len() > max_reviews {
        tracing::info!(
            received = reviews.len(),
            max_reviews,
            "truncating review batch"
        );
        reviews.truncate(max_reviews);
    }
    Ok(reviews)
}

fn render(result: &AggregateResult, options: &AnalyzeOptions) -> anyhow::Result<String> {
    let charts = ChartData::from_result(result);
    match options.format {
        OutputFormat::Markdown => Ok(render_markdown(result, &charts, options.samples)),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "result": result,
                "charts": charts,
            });
            Ok(serde_json::to_string_pretty(&doc)?)
        }
    }
}
