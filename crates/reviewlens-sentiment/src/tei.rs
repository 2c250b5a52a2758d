//! TEI (Text Embeddings Inference) client for sequence-classification models.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::classifier::AsyncClassifier;
use crate::error::{ClassifyError, SentimentError};
use crate::types::{Classification, SentimentLabel};

pub const TEI_DEFAULT_MODEL_NAME: &str = "tei-sequence-classifier";

/// TEI HTTP client serving `/predict`.
#[derive(Debug, Clone)]
pub struct TeiClassifier {
    client: reqwest::Client,
    base_url: String,
    model_name: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

/// `/predict` answers a single input with a flat list, batched inputs with nested lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Flat(Vec<Prediction>),
    Nested(Vec<Vec<Prediction>>),
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    model_id: String,
}

impl TeiClassifier {
    /// Create a new `TeiClassifier`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(tei_url: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: tei_url.trim_end_matches('/').to_string(),
            model_name: TEI_DEFAULT_MODEL_NAME.to_string(),
        })
    }

    #[must_use]
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Ask the server which model it is serving (`GET /info`).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] if the request fails or the body has no `model_id`.
    pub async fn fetch_model_id(&self) -> Result<String, ClassifyError> {
        let response = self
            .client
            .get(format!("{}/info", self.base_url))
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ClassifyError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let info: InfoResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Decode(format!("TEI info parse error: {e}")))?;
        Ok(info.model_id)
    }

    async fn predict(&self, text: &str) -> Result<Classification, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::EmptyText);
        }

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&PredictRequest { inputs: text })
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(ClassifyError::Unavailable(format!(
                "TEI returned status {status}"
            )));
        }
        if !status.is_success() {
            return Err(ClassifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let predictions = match response
            .json::<PredictResponse>()
            .await
            .map_err(|e| ClassifyError::Decode(format!("TEI response parse error: {e}")))?
        {
            PredictResponse::Flat(p) => p,
            PredictResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        };

        let best = predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| ClassifyError::Decode("TEI returned no predictions".to_string()))?;

        let label = map_label(&best.label)?;
        Ok(Classification::new(label, best.score))
    }
}

impl AsyncClassifier for TeiClassifier {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn classify_async(&self, text: &str) -> Result<Classification, ClassifyError> {
        self.predict(text).await
    }
}

/// Connection failures mean the service is down, not that this text is bad.
fn request_error(e: reqwest::Error) -> ClassifyError {
    if e.is_connect() {
        ClassifyError::Unavailable(format!("TEI connection failed: {e}"))
    } else {
        ClassifyError::Http(e)
    }
}

/// Map a model's label vocabulary onto [`SentimentLabel`].
///
/// Understands named labels (`POSITIVE`, `neg`, `Neutral`), the
/// `LABEL_0..LABEL_2` convention of three-way sentiment heads, and
/// `N star(s)` review-rating heads.
pub(crate) fn map_label(raw: &str) -> Result<SentimentLabel, ClassifyError> {
    let label = raw.trim().to_ascii_lowercase();

    if let Some(stars) = label
        .strip_suffix(" stars")
        .or_else(|| label.strip_suffix(" star"))
    {
        return match stars.trim().parse::<u8>() {
            Ok(1 | 2) => Ok(SentimentLabel::Negative),
            Ok(3) => Ok(SentimentLabel::Neutral),
            Ok(4 | 5) => Ok(SentimentLabel::Positive),
            _ => Err(ClassifyError::UnknownLabel(raw.to_string())),
        };
    }

    match label.as_str() {
        "label_0" => return Ok(SentimentLabel::Negative),
        "label_1" => return Ok(SentimentLabel::Neutral),
        "label_2" => return Ok(SentimentLabel::Positive),
        _ => {}
    }

    if label.contains("pos") {
        Ok(SentimentLabel::Positive)
    } else if label.contains("neg") {
        Ok(SentimentLabel::Negative)
    } else if label.contains("neu") {
        Ok(SentimentLabel::Neutral)
    } else {
        Err(ClassifyError::UnknownLabel(raw.to_string()))
    }
}
