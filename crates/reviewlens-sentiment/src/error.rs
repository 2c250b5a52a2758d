use thiserror::Error;

/// Failure classifying a single review.
///
/// Everything except [`ClassifyError::Unavailable`] is recovered per item by
/// the aggregator.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("review body is empty")]
    EmptyText,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("classifier response decode error: {0}")]
    Decode(String),

    #[error("unrecognized sentiment label {0:?}")]
    UnknownLabel(String),

    #[error("classifier backend error: {0}")]
    Backend(String),

    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

impl ClassifyError {
    /// Whether this failure means no further review in the batch can be classified.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("classifier {model} unavailable: {reason}")]
    ClassifierUnavailable { model: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier configuration error: {0}")]
    Config(String),
}
