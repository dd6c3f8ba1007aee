use anyhow::{Context, Result};

const DEFAULT_JSEARCH_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
const DEFAULT_JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if the RapidAPI key is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: String,
    pub jsearch_base_url: String,
    pub jsearch_host: String,
    pub upstream_timeout_secs: u64,
    /// When present, résumé fields are extracted by the LLM instead of heuristics.
    pub anthropic_api_key: Option<String>,
    /// Upload limit in bytes, from `MAX_UPLOAD_MB`.
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: require_env("RAPIDAPI_KEY")?,
            jsearch_base_url: std::env::var("JSEARCH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_JSEARCH_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            jsearch_host: std::env::var("JSEARCH_HOST")
                .unwrap_or_else(|_| DEFAULT_JSEARCH_HOST.to_string()),
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 30)?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            max_upload_bytes: megabytes_to_bytes(parse_env("MAX_UPLOAD_MB", 10)?)
                .context("MAX_UPLOAD_MB is too large")?,
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

}

fn megabytes_to_bytes(mb: usize) -> Option<usize> {
    mb.checked_mul(1024 * 1024)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration pointing the proxy at a local test upstream.
    pub fn for_tests(jsearch_base_url: &str) -> Self {
        Config {
            rapidapi_key: "test-key".to_string(),
            jsearch_base_url: jsearch_base_url.trim_end_matches('/').to_string(),
            jsearch_host: DEFAULT_JSEARCH_HOST.to_string(),
            upstream_timeout_secs: 5,
            anthropic_api_key: None,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
