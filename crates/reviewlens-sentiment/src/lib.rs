//! Review sentiment aggregation for reviewlens.
//!
//! Classifies scraped product reviews with a pluggable classifier (built-in
//! lexicon or a TEI-hosted sequence-classification model), reduces the labels
//! into an overall verdict with summary statistics, and derives chart data
//! for presentation layers.

pub mod aggregate;
pub mod backend;
pub mod charts;
pub mod classifier;
pub mod error;
pub mod lexicon;
pub mod tei;
pub mod types;

pub use aggregate::{SentimentAggregator, OUTAGE_STREAK};
pub use backend::ClassifierBackend;
pub use charts::{ChartData, DistributionBucket, ScoreIndicator};
pub use classifier::{AsyncClassifier, Classifier};
pub use error::{ClassifyError, SentimentError};
pub use lexicon::{lexicon_score, LexiconClassifier, LEXICON_MODEL_NAME};
pub use tei::TeiClassifier;
pub use types::{
    AggregateResult, AggregationPolicy, Classification, ReviewResult, SentimentLabel,
};
