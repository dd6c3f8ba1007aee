//! JSearch client. Forwards a job search to the RapidAPI JSearch provider
//! and hands back whatever JSON it answers with.
//!
//! One outbound request per call. No retries, no caching: the caller sees the
//! provider's answer or a transport error.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use serde::de::IgnoredAny;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod handlers;

#[derive(Debug, Error)]
pub enum JSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream body is not JSON (status {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Query parameters accepted by `GET /api/job-search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub num_pages: u32,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_date_posted")]
    pub date_posted: String,
}

fn default_page() -> u32 {
    1
}

fn default_country() -> String {
    "us".to_string()
}

fn default_date_posted() -> String {
    "all".to_string()
}

impl SearchParams {
    /// Builds `/search?...` with every value percent-encoded.
    /// Spaces become `%20`, never `+`.
    pub fn to_path(&self) -> String {
        format!(
            "/search?query={}&page={}&num_pages={}&country={}&date_posted={}",
            urlencoding::encode(&self.query),
            self.page,
            self.num_pages,
            urlencoding::encode(&self.country),
            urlencoding::encode(&self.date_posted),
        )
    }
}

/// The provider's answer: its status code and its JSON body, byte for byte.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl JSearchClient {
    pub fn new(config: &Config) -> Result<Self, JSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.jsearch_base_url.clone(),
            host: config.jsearch_host.clone(),
            api_key: config.rapidapi_key.clone(),
        })
    }

    /// Issues a single GET against the provider.
    pub async fn search(&self, params: &SearchParams) -> Result<UpstreamResponse, JSearchError> {
        let url = format!("{}{}", self.base_url, params.to_path());
        debug!("JSearch request: {url}");

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await
            .map_err(|e| {
                warn!("JSearch request failed: {e}");
                JSearchError::Http(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        // validated only; the body is forwarded untouched
        serde_json::from_slice::<IgnoredAny>(&bytes).map_err(|source| {
            warn!("JSearch returned a non-JSON body with status {status}");
            JSearchError::InvalidBody {
                status: status.as_u16(),
                source,
            }
        })?;

        if !status.is_success() {
            warn!("JSearch returned {status}");
        }

        Ok(UpstreamResponse {
            status: status.as_u16(),
            body: bytes,
        })
    }
}
