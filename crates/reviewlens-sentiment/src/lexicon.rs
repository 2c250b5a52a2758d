//! Word-lexicon sentiment classifier for product reviews.

use crate::classifier::{AsyncClassifier, Classifier};
use crate::error::ClassifyError;
use crate::types::{Classification, SentimentLabel};

pub const LEXICON_MODEL_NAME: &str = "lexicon-v1";

/// Scores within `(-threshold, threshold)` are labeled neutral.
const DEFAULT_NEUTRAL_THRESHOLD: f32 = 0.1;

/// Review-domain word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("perfect", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("loves", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("quality", 0.2),
    ("sturdy", 0.3),
    ("durable", 0.3),
    ("comfortable", 0.3),
    ("easy", 0.2),
    ("fast", 0.2),
    ("happy", 0.4),
    ("satisfied", 0.4),
    ("works", 0.2),
    ("worth", 0.3),
    ("nice", 0.3),
    ("fantastic", 0.5),
    ("reliable", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("poor", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("horrible", -0.6),
    ("worst", -0.6),
    ("broke", -0.5),
    ("broken", -0.5),
    ("defective", -0.6),
    ("cheap", -0.3),
    ("flimsy", -0.4),
    ("useless", -0.6),
    ("waste", -0.5),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("refund", -0.4),
    ("return", -0.3),
    ("returned", -0.4),
    ("stopped", -0.3),
    ("failed", -0.4),
    ("hate", -0.5),
    ("slow", -0.2),
    ("leaks", -0.4),
    ("overpriced", -0.4),
    ("junk", -0.6),
];

/// Words that flip the polarity of a lexicon hit shortly after them.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't",
    "isnt", "wasn't", "wasnt", "won't", "wont", "hardly",
];

/// Words that start a new clause and end any pending negation.
const CLAUSE_BREAKS: &[&str] = &["but", "however", "although", "though", "yet"];

/// Number of tokens after a negator in which a lexicon hit is flipped.
const NEGATION_WINDOW: usize = 3;

fn ends_clause(token: &str) -> bool {
    token.ends_with(['.', ',', '!', '?', ';', ':'])
}

/// Score a text string using the review lexicon.
///
/// Splits text into lowercase words and sums matching weights. A negator
/// flips the sign of the first matched word within the next
/// [`NEGATION_WINDOW`] tokens of the same clause; punctuation and words such
/// as "but" end the clause. The result is clamped to `[-1.0, 1.0]`; empty or
/// unknown text scores `0.0`.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    let mut window = 0_usize;
    for token in text.split_whitespace() {
        let w = token
            .trim_matches(|c: char| !c.is_alphabetic() && c != '\'')
            .trim_matches('\'')
            .to_lowercase();

        if NEGATORS.contains(&w.as_str()) {
            window = if ends_clause(token) { 0 } else { NEGATION_WINDOW };
            continue;
        }
        if CLAUSE_BREAKS.contains(&w.as_str()) {
            window = 0;
            continue;
        }

        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += if window > 0 { -weight } else { weight };
            window = 0;
        } else {
            window = window.saturating_sub(1);
        }
        if ends_clause(token) {
            window = 0;
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Deterministic classifier backed by [`lexicon_score`].
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    neutral_threshold: f32,
    model_name: String,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self {
            neutral_threshold: DEFAULT_NEUTRAL_THRESHOLD,
            model_name: LEXICON_MODEL_NAME.to_string(),
        }
    }
}

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    fn label(&self, text: &str) -> Result<Classification, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::EmptyText);
        }
        let score = lexicon_score(text);
        let classification = if score >= self.neutral_threshold {
            Classification::new(SentimentLabel::Positive, 0.5 + score / 2.0)
        } else if score <= -self.neutral_threshold {
            Classification::new(SentimentLabel::Negative, 0.5 + score.abs() / 2.0)
        } else {
            Classification::new(SentimentLabel::Neutral, 0.5)
        };
        Ok(classification)
    }
}

impl Classifier for LexiconClassifier {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        self.label(text)
    }
}

impl AsyncClassifier for LexiconClassifier {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn classify_async(&self, text: &str) -> Result<Classification, ClassifyError> {
        self.label(text)
    }
}
