//! Review-to-sentiment aggregation.

use futures::stream::{FuturesUnordered, StreamExt};
use reviewlens_core::Review;

use crate::classifier::{AsyncClassifier, Classifier};
use crate::error::{ClassifyError, SentimentError};
use crate::types::{AggregateResult, AggregationPolicy, Classification, ReviewResult};

/// Classifies review batches and reduces them into an [`AggregateResult`].
///
/// Holds no per-batch state; one aggregator can serve any number of requests.
#[derive(Debug, Clone, Default)]
pub struct SentimentAggregator {
    policy: AggregationPolicy,
}

#[derive(Debug, Clone, Copy)]
struct Settled {
    classification: Classification,
    fallback: bool,
}

impl Settled {
    fn fallback() -> Self {
        Self {
            classification: Classification::fallback(),
            fallback: true,
        }
    }
}

/// Consecutive [`ClassifyError::Unavailable`] outcomes after which the
/// classifier is treated as down and the batch is abandoned.
pub const OUTAGE_STREAK: usize = 3;

/// Tells a flaky classifier apart from one that is down.
///
/// Blank bodies never reach the classifier and are not counted.
#[derive(Debug, Default)]
struct OutageTracker {
    attempted: usize,
    unavailable: usize,
    streak: usize,
    last_reason: Option<String>,
}

impl OutageTracker {
    fn observe(&mut self, outcome: &Result<Classification, ClassifyError>) {
        match outcome {
            Err(ClassifyError::EmptyText) => {}
            Err(ClassifyError::Unavailable(reason)) => {
                self.attempted += 1;
                self.unavailable += 1;
                self.streak += 1;
                self.last_reason = Some(reason.clone());
            }
            _ => {
                self.attempted += 1;
                self.streak = 0;
            }
        }
    }

    /// Fails once [`OUTAGE_STREAK`] unavailable outcomes arrive in a row or,
    /// when `finished`, if every attempted review came back unavailable.
    fn check(&self, model: &str, finished: bool) -> Result<(), SentimentError> {
        let all_down = finished && self.unavailable > 0 && self.unavailable == self.attempted;
        if self.streak < OUTAGE_STREAK && !all_down {
            return Ok(());
        }
        let reason = self.last_reason.clone().unwrap_or_default();
        tracing::error!(
            model,
            unavailable = self.unavailable,
            attempted = self.attempted,
            %reason,
            "classifier unavailable; aborting batch"
        );
        Err(SentimentError::ClassifierUnavailable {
            model: model.to_string(),
            reason,
        })
    }
}

impl SentimentAggregator {
    #[must_use]
    pub fn new(policy: AggregationPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &AggregationPolicy {
        &self.policy
    }

    /// Classify `reviews` one at a time and aggregate the results.
    ///
    /// Blank bodies and per-review classifier failures, including an isolated
    /// [`ClassifyError::Unavailable`], are recorded as neutral with zero
    /// confidence; the rest of the batch is still classified.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ClassifierUnavailable`] once [`OUTAGE_STREAK`]
    /// reviews in a row report [`ClassifyError::Unavailable`], or if every
    /// review sent to the classifier did.
    pub fn analyze<C>(
        &self,
        classifier: &C,
        reviews: &[Review],
    ) -> Result<AggregateResult, SentimentError>
    where
        C: Classifier + ?Sized,
    {
        let model = classifier.model_name();
        let mut settled = Vec::with_capacity(reviews.len());
        let mut outage = OutageTracker::default();

        for (index, review) in reviews.iter().enumerate() {
            let outcome = if review.is_blank() {
                Err(ClassifyError::EmptyText)
            } else {
                classifier.classify(&review.body)
            };
            outage.observe(&outcome);
            outage.check(model, false)?;
            settled.push(settle(index, outcome));
        }
        outage.check(model, true)?;

        Ok(self.reduce(model, reviews, settled))
    }

    /// Classify up to `concurrency` reviews at a time and aggregate the results.
    ///
    /// Results are written back by input index, so `detailed_results` keeps
    /// input order whatever order classifications complete in. A
    /// `concurrency` of `0` is treated as `1`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ClassifierUnavailable`] under the same outage
    /// rule as [`analyze`](Self::analyze), with streaks counted in completion
    /// order; in-flight classifications are dropped.
    pub async fn analyze_concurrent<C>(
        &self,
        classifier: &C,
        reviews: &[Review],
        concurrency: usize,
    ) -> Result<AggregateResult, SentimentError>
    where
        C: AsyncClassifier + ?Sized,
    {
        let model = classifier.model_name();
        let limit = concurrency.max(1);
        let mut slots: Vec<Option<Settled>> = vec![None; reviews.len()];
        let mut pending = reviews.iter().enumerate();
        let mut in_flight = FuturesUnordered::new();
        let mut outage = OutageTracker::default();

        loop {
            while in_flight.len() < limit {
                let Some((index, review)) = pending.next() else {
                    break;
                };
                in_flight.push(classify_one(classifier, index, review));
            }
            let Some((index, outcome)) = in_flight.next().await else {
                break;
            };
            outage.observe(&outcome);
            outage.check(model, false)?;
            slots[index] = Some(settle(index, outcome));
        }
        outage.check(model, true)?;

        let settled = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(Settled::fallback))
            .collect();

        Ok(self.reduce(model, reviews, settled))
    }

    fn reduce(&self, model: &str, reviews: &[Review], settled: Vec<Settled>) -> AggregateResult {
        let detailed_results: Vec<ReviewResult> = reviews
            .iter()
            .zip(settled)
            .map(|(review, s)| ReviewResult {
                review: review.clone(),
                classification: s.classification,
                fallback: s.fallback,
            })
            .collect();

        let result = AggregateResult::new(&self.policy, model, detailed_results);

        tracing::info!(
            model,
            total = result.total(),
            positive = result.positive_count(),
            negative = result.negative_count(),
            fallbacks = result.failed_count(),
            overall = %result.overall_sentiment(),
            score = result.score(),
            "sentiment batch aggregated"
        );

        result
    }
}

async fn classify_one<C>(
    classifier: &C,
    index: usize,
    review: &Review,
) -> (usize, Result<Classification, ClassifyError>)
where
    C: AsyncClassifier + ?Sized,
{
    let outcome = if review.is_blank() {
        Err(ClassifyError::EmptyText)
    } else {
        classifier.classify_async(&review.body).await
    };
    (index, outcome)
}

/// Resolve one classifier outcome under the partial-failure policy.
fn settle(index: usize, outcome: Result<Classification, ClassifyError>) -> Settled {
    match outcome {
        Ok(classification) => {
            tracing::debug!(
                review = index,
                label = %classification.label,
                confidence = classification.confidence,
                "review classified"
            );
            Settled {
                classification,
                fallback: false,
            }
        }
        Err(ClassifyError::EmptyText) => {
            tracing::debug!(review = index, "blank review body; recording neutral");
            Settled::fallback()
        }
        Err(e) => {
            tracing::warn!(review = index, error = %e, "classification failed; recording neutral");
            Settled::fallback()
        }
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
