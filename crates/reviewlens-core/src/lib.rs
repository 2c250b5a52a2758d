//! Shared domain types and configuration for reviewlens.

mod app_config;
mod config;
mod review;

pub use app_config::{AppConfig, ClassifierKind, Environment, TieBreak};
pub use config::{load_app_config, load_app_config_from_env};
pub use review::{parse_reviews_json, RawRating, RawReview, Review, DEFAULT_PRODUCT_TITLE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("invalid review JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("review {index}: invalid rating {raw:?}: {reason}")]
    InvalidRating {
        index: usize,
        raw: String,
        reason: String,
    },
}
