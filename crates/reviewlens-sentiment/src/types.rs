use reviewlens_core::{AppConfig, Review, TieBreak};
use serde::{Deserialize, Serialize};

/// Sentiment label assigned to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output for one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f32,
}

impl Classification {
    /// Build a classification, clamping `confidence` into `[0.0, 1.0]`.
    /// Non-finite confidences become `0.0`.
    #[must_use]
    pub fn new(label: SentimentLabel, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { label, confidence }
    }

    /// Neutral, zero-confidence stand-in for a review that could not be classified.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

/// A review paired with its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewResult {
    pub review: Review,
    pub classification: Classification,
    /// `true` when the classification is a substitute for a failed or blank item.
    pub fallback: bool,
}

/// Rules for reducing per-review labels into an overall verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationPolicy {
    pub tie_break: TieBreak,
    /// Score reported when no review was labeled positive or negative.
    pub neutral_midpoint: f32,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Neutral,
            neutral_midpoint: 0.5,
        }
    }
}

impl AggregationPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tie_break: config.tie_break,
            neutral_midpoint: config.neutral_midpoint,
        }
    }

    /// Majority of positive vs. negative. Equal non-zero counts follow
    /// `tie_break`; no polar labels at all is always neutral.
    #[must_use]
    pub fn verdict(&self, positive_count: usize, negative_count: usize) -> SentimentLabel {
        match positive_count.cmp(&negative_count) {
            std::cmp::Ordering::Greater => SentimentLabel::Positive,
            std::cmp::Ordering::Less => SentimentLabel::Negative,
            std::cmp::Ordering::Equal if positive_count == 0 => SentimentLabel::Neutral,
            std::cmp::Ordering::Equal => match self.tie_break {
                TieBreak::Neutral => SentimentLabel::Neutral,
                TieBreak::Positive => SentimentLabel::Positive,
                TieBreak::Negative => SentimentLabel::Negative,
            },
        }
    }
}

/// Summary of one analyzed batch. Built only by the aggregator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    overall_sentiment: SentimentLabel,
    score: f32,
    positive_count: usize,
    negative_count: usize,
    average_confidence: Option<f32>,
    detailed_results: Vec<ReviewResult>,
    model_name: String,
    #[serde(skip)]
    midpoint: f32,
}

impl AggregateResult {
    pub(crate) fn empty(model_name: &str, midpoint: f32) -> Self {
        Self {
            overall_sentiment: SentimentLabel::Neutral,
            score: midpoint,
            positive_count: 0,
            negative_count: 0,
            average_confidence: None,
            detailed_results: Vec::new(),
            model_name: model_name.to_string(),
            midpoint,
        }
    }

    pub(crate) fn new(
        policy: &AggregationPolicy,
        model_name: &str,
        detailed_results: Vec<ReviewResult>,
    ) -> Self {
        if detailed_results.is_empty() {
            return Self::empty(model_name, policy.neutral_midpoint);
        }

        let count = |label: SentimentLabel| {
            detailed_results
                .iter()
                .filter(|r| r.classification.label == label)
                .count()
        };
        let positive_count = count(SentimentLabel::Positive);
        let negative_count = count(SentimentLabel::Negative);
        let polar = positive_count + negative_count;

        #[allow(clippy::cast_precision_loss)]
        let score = if polar == 0 {
            policy.neutral_midpoint
        } else {
            positive_count as f32 / polar as f32
        };

        #[allow(clippy::cast_precision_loss)]
        let average_confidence = {
            let sum: f32 = detailed_results
                .iter()
                .map(|r| r.classification.confidence)
                .sum();
            sum / detailed_results.len() as f32
        };

        Self {
            overall_sentiment: policy.verdict(positive_count, negative_count),
            score,
            positive_count,
            negative_count,
            average_confidence: Some(average_confidence),
            detailed_results,
            model_name: model_name.to_string(),
            midpoint: policy.neutral_midpoint,
        }
    }

    #[must_use]
    pub fn overall_sentiment(&self) -> SentimentLabel {
        self.overall_sentiment
    }

    /// Share of positive among polar (positive + negative) reviews, in `[0, 1]`.
    #[must_use]
    pub fn score(&self) -> f32 {
        self.score
    }

    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.positive_count
    }

    #[must_use]
    pub fn negative_count(&self) -> usize {
        self.negative_count
    }

    #[must_use]
    pub fn neutral_count(&self) -> usize {
        self.total() - self.positive_count - self.negative_count
    }

    /// Mean confidence over every review; `None` for an empty batch.
    #[must_use]
    pub fn average_confidence(&self) -> Option<f32> {
        self.average_confidence
    }

    /// Per-review results in input order.
    #[must_use]
    pub fn detailed_results(&self) -> &[ReviewResult] {
        &self.detailed_results
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.detailed_results.len()
    }

    /// Number of reviews that received the fallback classification.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.detailed_results.iter().filter(|r| r.fallback).count()
    }

    /// First `n` results, for sample-review displays.
    #[must_use]
    pub fn samples(&self, n: usize) -> &[ReviewResult] {
        &self.detailed_results[..n.min(self.detailed_results.len())]
    }

    /// Title of the first review's product, if any review was analyzed.
    #[must_use]
    pub fn product_title(&self) -> Option<&str> {
        self.detailed_results
            .first()
            .map(|r| r.review.product_title.as_str())
    }

    /// Score separating the positive and negative bands.
    #[must_use]
    pub fn midpoint(&self) -> f32 {
        self.midpoint
    }
}
