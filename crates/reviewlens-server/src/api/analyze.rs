use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use reviewlens_core::{RawReview, Review};
use reviewlens_sentiment::{AggregateResult, ChartData, SentimentError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeData {
    pub result: AggregateResult,
    pub charts: ChartData,
    /// Reviews beyond the configured batch cap that were not analyzed.
    pub dropped_reviews: usize,
}

pub(super) async fn analyze_reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyzeData>>, ApiError> {
    let Json(request) = payload
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    let received = request.reviews.len();
    let reviews = request
        .reviews
        .into_iter()
        .take(state.max_reviews)
        .enumerate()
        .map(|(index, raw)| Review::from_raw(index, raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;
    let dropped_reviews = received - reviews.len();

    if dropped_reviews > 0 {
        tracing::info!(
            request_id = %req_id.0,
            received,
            dropped = dropped_reviews,
            "truncating review batch"
        );
    }

    let result = state
        .aggregator
        .analyze_concurrent(state.classifier.as_ref(), &reviews, state.concurrency)
        .await
        .map_err(|e| map_sentiment_error(req_id.0.clone(), &e))?;
    let charts = ChartData::from_result(&result);

    Ok(Json(ApiResponse {
        data: AnalyzeData {
            result,
            charts,
            dropped_reviews,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_sentiment_error(request_id: String, error: &SentimentError) -> ApiError {
    match error {
        SentimentError::ClassifierUnavailable { .. } => {
            tracing::error!(error = %error, "classifier unavailable");
            ApiError::new(request_id, "classifier_unavailable", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "sentiment analysis failed");
            ApiError::new(request_id, "internal_error", "sentiment analysis failed")
        }
    }
}
