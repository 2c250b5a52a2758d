//! Review records and boundary validation of scraped input.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ReviewError;

/// Title used when the scraper did not capture one.
pub const DEFAULT_PRODUCT_TITLE: &str = "Unknown Product";

const MAX_RATING: f32 = 5.0;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("valid rating regex"));

static TRAILING_LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+ \d{1,2}, \d{4})\s*$").expect("valid review date regex")
});

/// A single product review, validated and ready for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review text. May be empty; empty bodies are classified as neutral.
    pub body: String,
    pub product_title: String,
    /// Star rating in `[0, 5]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A review as emitted by the scraper, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub rating: Option<RawRating>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Ratings arrive either as numbers or as display text (`"4.0 out of 5 stars"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Number(f32),
    Text(String),
}

impl Review {
    /// Build a review with only a body and the default product title.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            product_title: DEFAULT_PRODUCT_TITLE.to_string(),
            rating: None,
            author: None,
            date: None,
        }
    }

    #[must_use]
    pub fn with_product_title(mut self, title: impl Into<String>) -> Self {
        self.product_title = title.into();
        self
    }

    /// Validate a scraped record.
    ///
    /// `index` is the record's position in its batch and only appears in
    /// error messages. Missing bodies become empty strings, blank titles fall
    /// back to [`DEFAULT_PRODUCT_TITLE`], and unparseable dates are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidRating`] if a rating is present but is not
    /// a number within `[0, 5]`.
    pub fn from_raw(index: usize, raw: RawReview) -> Result<Self, ReviewError> {
        let body = raw.body.map(|b| b.trim().to_string()).unwrap_or_default();

        let product_title = raw
            .product_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_TITLE.to_string());

        let rating = raw
            .rating
            .map(|rating| parse_rating(index, rating))
            .transpose()?;

        let author = raw
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let date = raw.date.as_deref().and_then(parse_review_date);

        Ok(Self {
            body,
            product_title,
            rating,
            author,
            date,
        })
    }

    /// True when the body carries no classifiable text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Parse a JSON array of scraped review records into validated reviews.
///
/// # Errors
///
/// Returns [`ReviewError::Json`] for malformed JSON and
/// [`ReviewError::InvalidRating`] for out-of-range ratings.
pub fn parse_reviews_json(input: &str) -> Result<Vec<Review>, ReviewError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawReview> = serde_json::from_str(input)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| Review::from_raw(index, record))
        .collect()
}

fn parse_rating(index: usize, rating: RawRating) -> Result<f32, ReviewError> {
    let (value, raw) = match rating {
        RawRating::Number(n) => (n, n.to_string()),
        RawRating::Text(text) => {
            let value = LEADING_NUMBER
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f32>().ok())
                .ok_or_else(|| ReviewError::InvalidRating {
                    index,
                    raw: text.clone(),
                    reason: "no leading number".to_string(),
                })?;
            (value, text)
        }
    };

    if !value.is_finite() || !(0.0..=MAX_RATING).contains(&value) {
        return Err(ReviewError::InvalidRating {
            index,
            raw,
            reason: format!("must be between 0 and {MAX_RATING}"),
        });
    }
    Ok(value)
}

/// Accepts ISO dates and Amazon-style "Reviewed in ... on March 3, 2024".
fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let caps = TRAILING_LONG_DATE.captures(raw)?;
    NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%B %d, %Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(body: &str) -> RawReview {
        RawReview {
            body: Some(body.to_string()),
            ..RawReview::default()
        }
    }

    #[test]
    fn missing_body_becomes_blank_review() {
        let review = Review::from_raw(0, RawReview::default()).unwrap();
        assert_eq!(review.body, "");
        assert!(review.is_blank());
        assert_eq!(review.product_title, DEFAULT_PRODUCT_TITLE);
    }

    #[test]
    fn body_and_title_are_trimmed() {
        let mut record = raw("  Works fine.  ");
        record.product_title = Some("  Desk Lamp ".to_string());
        let review = Review::from_raw(0, record).unwrap();
        assert_eq!(review.body, "Works fine.");
        assert_eq!(review.product_title, "Desk Lamp");
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        let mut record = raw("ok");
        record.product_title = Some("   ".to_string());
        let review = Review::from_raw(0, record).unwrap();
        assert_eq!(review.product_title, DEFAULT_PRODUCT_TITLE);
    }

    #[test]
    fn numeric_rating_is_accepted() {
        let mut record = raw("ok");
        record.rating = Some(RawRating::Number(4.0));
        let review = Review::from_raw(0, record).unwrap();
        assert_eq!(review.rating, Some(4.0));
    }

    #[test]
    fn star_text_rating_is_parsed() {
        let mut record = raw("ok");
        record.rating = Some(RawRating::Text("3.5 out of 5 stars".to_string()));
        let review = Review::from_raw(0, record).unwrap();
        assert_eq!(review.rating, Some(3.5));
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut record = raw("ok");
        record.rating = Some(RawRating::Number(7.0));
        let err = Review::from_raw(3, record).unwrap_err();
        assert!(
            matches!(err, ReviewError::InvalidRating { index: 3, .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn non_numeric_rating_text_is_rejected() {
        let mut record = raw("ok");
        record.rating = Some(RawRating::Text("five stars".to_string()));
        assert!(Review::from_raw(0, record).is_err());
    }

    #[test]
    fn iso_date_is_parsed() {
        assert_eq!(
            parse_review_date("2024-03-03"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
    }

    #[test]
    fn amazon_style_date_is_parsed() {
        assert_eq!(
            parse_review_date("Reviewed in the United States on March 3, 2024"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
    }

    #[test]
    fn unparseable_date_is_dropped() {
        let mut record = raw("ok");
        record.date = Some("last Tuesday".to_string());
        let review = Review::from_raw(0, record).unwrap();
        assert!(review.date.is_none());
    }

    #[test]
    fn parse_reviews_json_preserves_order() {
        let input = r#"[
            {"body": "first", "product_title": "Kettle"},
            {"body": "second", "rating": "2.0 out of 5 stars"},
            {}
        ]"#;
        let reviews = parse_reviews_json(input).unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].body, "first");
        assert_eq!(reviews[0].product_title, "Kettle");
        assert_eq!(reviews[1].rating, Some(2.0));
        assert!(reviews[2].is_blank());
    }

    #[test]
    fn parse_reviews_json_empty_input_is_empty_batch() {
        assert!(parse_reviews_json("").unwrap().is_empty());
        assert!(parse_reviews_json("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_reviews_json_rejects_non_array() {
        let err = parse_reviews_json(r#"{"body": "x"}"#).unwrap_err();
        assert!(matches!(err, ReviewError::Json(_)));
    }
}
