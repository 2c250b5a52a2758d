use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentiment classifier backs an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    /// Built-in word lexicon; no network access.
    Lexicon,
    /// Remote Text Embeddings Inference `/predict` endpoint.
    Tei,
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::Lexicon => write!(f, "lexicon"),
            ClassifierKind::Tei => write!(f, "tei"),
        }
    }
}

/// How an equal positive/negative count is resolved into a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    Neutral,
    Positive,
    Negative,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub classifier: ClassifierKind,
    pub tei_url: Option<String>,
    pub model_name: Option<String>,
    pub classify_concurrency: usize,
    pub classify_timeout_secs: u64,
    pub max_reviews: usize,
    pub sample_reviews: usize,
    pub tie_break: TieBreak,
    pub neutral_midpoint: f32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // TEI URLs can carry basic-auth credentials.
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("classifier", &self.classifier)
            .field("tei_url", &self.tei_url.as_ref().map(|_| "[redacted]"))
            .field("model_name", &self.model_name)
            .field("classify_concurrency", &self.classify_concurrency)
            .field("classify_timeout_secs", &self.classify_timeout_secs)
            .field("max_reviews", &self.max_reviews)
            .field("sample_reviews", &self.sample_reviews)
            .field("tie_break", &self.tie_break)
            .field("neutral_midpoint", &self.neutral_midpoint)
            .finish()
    }
}
