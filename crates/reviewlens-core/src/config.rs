use crate::app_config::{AppConfig, ClassifierKind, Environment, TieBreak};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("REVIEWLENS_ENV", "development"))?;

    let bind_addr = or_default("REVIEWLENS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("REVIEWLENS_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("REVIEWLENS_LOG_LEVEL", "info");

    let classifier = parse_classifier(&or_default("REVIEWLENS_CLASSIFIER", "lexicon"))?;
    let tei_url = lookup("REVIEWLENS_TEI_URL")
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty());
    if classifier == ClassifierKind::Tei && tei_url.is_none() {
        return Err(ConfigError::MissingEnvVar("REVIEWLENS_TEI_URL".to_string()));
    }
    let model_name = lookup("REVIEWLENS_MODEL_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty());

    let classify_concurrency = parse_usize("REVIEWLENS_CLASSIFY_CONCURRENCY", "4")?;
    let classify_timeout_secs = parse_u64("REVIEWLENS_CLASSIFY_TIMEOUT_SECS", "30")?;
    let max_reviews = parse_usize("REVIEWLENS_MAX_REVIEWS", "50")?;
    let sample_reviews = parse_usize("REVIEWLENS_SAMPLE_REVIEWS", "5")?;

    let tie_break = parse_tie_break(&or_default("REVIEWLENS_TIE_BREAK", "neutral"))?;
    let neutral_midpoint = or_default("REVIEWLENS_NEUTRAL_MIDPOINT", "0.5")
        .parse::<f32>()
        .map_err(|e| invalid("REVIEWLENS_NEUTRAL_MIDPOINT", e.to_string()))?;
    if !(0.0..=1.0).contains(&neutral_midpoint) {
        return Err(invalid(
            "REVIEWLENS_NEUTRAL_MIDPOINT",
            format!("{neutral_midpoint} is outside [0, 1]"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        classifier,
        tei_url,
        model_name,
        classify_concurrency,
        classify_timeout_secs,
        max_reviews,
        sample_reviews,
        tie_break,
        neutral_midpoint,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVIEWLENS_ENV".to_string(),
            reason: format!("unknown environment {other:?}"),
        }),
    }
}

fn parse_classifier(s: &str) -> Result<ClassifierKind, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "lexicon" => Ok(ClassifierKind::Lexicon),
        "tei" => Ok(ClassifierKind::Tei),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVIEWLENS_CLASSIFIER".to_string(),
            reason: format!("expected `lexicon` or `tei`, got {other:?}"),
        }),
    }
}

fn parse_tie_break(s: &str) -> Result<TieBreak, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "neutral" => Ok(TieBreak::Neutral),
        "positive" => Ok(TieBreak::Positive),
        "negative" => Ok(TieBreak::Negative),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVIEWLENS_TIE_BREAK".to_string(),
            reason: format!("expected positive, negative, or neutral, got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
