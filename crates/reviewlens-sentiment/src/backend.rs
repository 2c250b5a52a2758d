//! Config-selected classifier used by the CLI and server.

use reviewlens_core::{AppConfig, ClassifierKind};

use crate::classifier::AsyncClassifier;
use crate::error::{ClassifyError, SentimentError};
use crate::lexicon::LexiconClassifier;
use crate::tei::TeiClassifier;
use crate::types::Classification;

#[derive(Debug, Clone)]
pub enum ClassifierBackend {
    Lexicon(LexiconClassifier),
    Tei(TeiClassifier),
}

impl ClassifierBackend {
    /// Build the classifier named by `config.classifier`.
    ///
    /// For TEI without an explicit `model_name`, the served model id is looked
    /// up via `/info`; a failed lookup only logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Config`] if TEI is selected without a URL, or
    /// [`SentimentError::Http`] if the HTTP client cannot be built.
    pub async fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        match config.classifier {
            ClassifierKind::Lexicon => {
                let mut classifier = LexiconClassifier::new();
                if let Some(name) = &config.model_name {
                    classifier = classifier.with_model_name(name.clone());
                }
                Ok(Self::Lexicon(classifier))
            }
            ClassifierKind::Tei => {
                let url = config.tei_url.as_deref().ok_or_else(|| {
                    SentimentError::Config("REVIEWLENS_TEI_URL is not set".to_string())
                })?;
                let mut classifier = TeiClassifier::new(url, config.classify_timeout_secs)?;
                if let Some(name) = &config.model_name {
                    classifier = classifier.with_model_name(name.clone());
                } else {
                    match classifier.fetch_model_id().await {
                        Ok(model_id) => classifier = classifier.with_model_name(model_id),
                        Err(e) => {
                            tracing::warn!(error = %e, "TEI model id lookup failed; using default name");
                        }
                    }
                }
                Ok(Self::Tei(classifier))
            }
        }
    }
}

impl AsyncClassifier for ClassifierBackend {
    fn model_name(&self) -> &str {
        match self {
            Self::Lexicon(c) => c.model_name(),
            Self::Tei(c) => c.model_name(),
        }
    }

    async fn classify_async(&self, text: &str) -> Result<Classification, ClassifyError> {
        match self {
            Self::Lexicon(c) => c.classify_async(text).await,
            Self::Tei(c) => c.classify_async(text).await,
        }
    }
}
