//! HTTP client for the upstream DLE data API.
//!
//! Wraps the endpoint set of the data service (word of the day, random
//! word, search, fetch by id, key prefix query, anagram search),
//! strips the JSONP envelopes some endpoints return, and normalizes
//! non-article payloads before handing them back.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use crate::article::{extract_document, is_article};
use crate::config::{
    endpoint_url, validate_entry_id, AUTH_TOKEN, BASE_URL, HTTP_TIMEOUT_SECS, USER_AGENT,
};
use crate::entities::normalize;
use crate::error::{ExtractorError, Result};

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// JSONP envelopes the data API wraps some responses in.
const JSONP_WRAPPERS: &[&str] = &["json", "jsonp123"];

/// Client for the DLE data API.
pub struct DleClient {
    http: Client,
    base_url: String,
}

impl DleClient {
    /// Create a client against the production data API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Create a client against an arbitrary base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(AUTH_TOKEN) {
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Word of the day.
    pub async fn word_of_the_day(&self) -> Result<String> {
        self.request("wotd", &[("callback", "json")], false).await
    }

    /// A random entry.
    pub async fn random_word(&self) -> Result<String> {
        self.request("random", &[], false).await
    }

    /// Search entries matching a word.
    pub async fn search(&self, query: &str) -> Result<String> {
        self.request("search", &[("w", query)], false).await
    }

    /// Fetch one entry by article id, optionally with its conjugation table.
    pub async fn fetch_word(&self, id: &str, include_conjugations: bool) -> Result<String> {
        validate_entry_id(id)?;
        self.request("fetch", &[("id", id)], include_conjugations)
            .await
    }

    /// Prefix query over entry keys.
    pub async fn key_query(&self, query: &str) -> Result<String> {
        self.request("keys", &[("q", query), ("callback", "jsonp123")], false)
            .await
    }

    /// Entries that are anagrams of a word.
    pub async fn anagram(&self, word: &str) -> Result<String> {
        self.request("anagram", &[("w", word)], false).await
    }

    /// Perform a request and post-process the payload.
    ///
    /// Article markup is run through the extraction engine; anything
    /// else has its JSONP envelope stripped and its entities and
    /// superscript markers normalized.
    async fn request(
        &self,
        path: &str,
        query: &[(&str, &str)],
        include_conjugations: bool,
    ) -> Result<String> {
        let url = endpoint_url(&self.base_url, path);
        let body = self.download(&url, query, path).await?;
        let body = body.trim();

        if is_article(body) {
            return extract_document(body, include_conjugations);
        }

        Ok(normalize(strip_jsonp(body)))
    }

    /// Download a body with retry on transient failures.
    ///
    /// Uses exponential backoff for network errors and 5xx responses;
    /// 4xx responses surface immediately since they will not succeed.
    async fn download(&self, url: &str, query: &[(&str, &str)], endpoint: &str) -> Result<String> {
        let mut last_error: Option<String> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1000ms
                let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
                tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.http.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_server_error() {
                        tracing::warn!(
                            status = %status,
                            attempt = attempt + 1,
                            max_retries = MAX_RETRIES,
                            "Server error, will retry"
                        );
                        last_error = Some(format!("Server error: {status}"));
                        continue;
                    }

                    if !status.is_success() {
                        return Err(ExtractorError::UpstreamStatus {
                            endpoint: endpoint.to_string(),
                            status: status.as_u16(),
                        });
                    }

                    return Ok(response.text().await?);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        tracing::warn!(
                            error = %e,
                            attempt = attempt + 1,
                            max_retries = MAX_RETRIES,
                            "Connection error, will retry"
                        );
                        last_error = Some(e.to_string());
                        continue;
                    }
                    return Err(ExtractorError::Http(e));
                }
            }
        }

        Err(ExtractorError::RetriesExhausted {
            attempts: MAX_RETRIES,
            message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
        })
    }
}

/// Strip a JSONP envelope like `json(...)` or `jsonp123(...)`.
///
/// Payloads without a recognized envelope are returned as-is.
fn strip_jsonp(body: &str) -> &str {
    for wrapper in JSONP_WRAPPERS {
        if let Some(rest) = body.strip_prefix(wrapper) {
            if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                return inner;
            }
        }
    }
    body
}
