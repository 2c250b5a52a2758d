//! Chart-ready views of an [`AggregateResult`].

use serde::Serialize;

use crate::types::{AggregateResult, SentimentLabel};

/// Series data for the distribution chart and the score gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Always three buckets, in order: positive, negative, neutral.
    pub distribution: Vec<DistributionBucket>,
    pub score_indicator: ScoreIndicator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    pub label: SentimentLabel,
    pub count: usize,
    /// Fraction of all reviews in this bucket; `0.0` for an empty batch.
    pub share: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreIndicator {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub midpoint: f32,
    /// Which side of `midpoint` the score falls on.
    pub band: SentimentLabel,
}

impl ChartData {
    #[must_use]
    pub fn from_result(result: &AggregateResult) -> Self {
        let total = result.total();

        #[allow(clippy::cast_precision_loss)]
        let bucket = |label: SentimentLabel, count: usize| DistributionBucket {
            label,
            count,
            share: if total == 0 {
                0.0
            } else {
                count as f32 / total as f32
            },
        };

        let distribution = vec![
            bucket(SentimentLabel::Positive, result.positive_count()),
            bucket(SentimentLabel::Negative, result.negative_count()),
            bucket(SentimentLabel::Neutral, result.neutral_count()),
        ];

        let value = result.score();
        let midpoint = result.midpoint();
        let band = if (value - midpoint).abs() < f32::EPSILON {
            SentimentLabel::Neutral
        } else if value > midpoint {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };

        Self {
            distribution,
            score_indicator: ScoreIndicator {
                value,
                min: 0.0,
                max: 1.0,
                midpoint,
                band,
            },
        }
    }
}
