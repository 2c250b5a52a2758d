//! Classifier capability consumed by the aggregator.

use std::future::Future;

use crate::error::ClassifyError;
use crate::types::Classification;

/// Synchronous per-text sentiment classifier.
pub trait Classifier {
    /// Identifier reported in `AggregateResult::model_name`.
    fn model_name(&self) -> &str;

    /// Classify one review body.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] when this text cannot be classified. Return
    /// [`ClassifyError::Unavailable`] only when no text could be classified.
    fn classify(&self, text: &str) -> Result<Classification, ClassifyError>;
}

/// Classifier whose calls suspend, such as a remote inference service.
pub trait AsyncClassifier {
    fn model_name(&self) -> &str;

    /// Async counterpart of [`Classifier::classify`], with the same error contract.
    fn classify_async(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Classification, ClassifyError>> + Send;
}
