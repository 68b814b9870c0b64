//! Congress API client for fetching raw directory responses.
//!
//! This module provides a trait-based HTTP client for interacting with
//! the Congress.gov directory. The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with `MockHttpServer` in integration tests
//! - Swapping implementations (e.g., different API providers)
//!
//! # Example
//!
//! ```ignore
//! use repfinder_api::congress::{ApiKeySource, CongressApiClient, HttpCongressClient};
//!
//! let client = HttpCongressClient::new("https://api.congress.gov/v3", ApiKeySource::env("LOC_API_KEY"));
//! let body = client.fetch("/member/TN", &[("format", "json"), ("limit", "75")]).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Longest upstream error body kept for diagnostics.
pub const MAX_ERROR_BODY_BYTES: usize = 2048;

/// Errors that can occur when looking up members through the Congress API.
#[derive(Debug, Error)]
pub enum CongressApiError {
    /// Missing credential or unusable endpoint configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Network failure that outlasted the retry budget
    #[error("HTTP request failed after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// API answered with a non-success status
    #[error("API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl CongressApiError {
    /// Short stable label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Transport { .. } => "transport",
            Self::Upstream { .. } => "upstream",
            Self::Schema(_) => "schema",
        }
    }
}

/// Where the API key comes from.
///
/// `Env` is read on every request so a key rotated in the environment is
/// picked up without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    Env(String),
    Static(String),
}

impl ApiKeySource {
    pub fn env(var: impl Into<String>) -> Self {
        Self::Env(var.into())
    }

    pub fn fixed(key: impl Into<String>) -> Self {
        Self::Static(key.into())
    }

    /// Resolve the key, treating an empty value as missing.
    ///
    /// # Errors
    /// Returns [`CongressApiError::Config`] when no key is available.
    pub fn resolve(&self) -> Result<String, CongressApiError> {
        let (key, origin) = match self {
            Self::Env(var) => (std::env::var(var).ok(), var.as_str()),
            Self::Static(key) => (Some(key.clone()), "static configuration"),
        };

        key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            CongressApiError::Config(format!(
                "API key not set ({origin}); get a key at api.data.gov"
            ))
        })
    }
}

/// Attempt budget and timing for outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after failed attempt `n` is `n * backoff_step`
    pub backoff_step: Duration,
    /// Bound on each individual attempt
    pub request_timeout: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(500),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Trait for Congress API operations.
///
/// Use `HttpCongressClient` for real HTTP calls, or `mock::MockCongressClient`
/// in tests.
#[async_trait]
pub trait CongressApiClient: Send + Sync {
    /// GET `path` with the given query parameters and return the raw body.
    async fn fetch(&self, path: &str, params: &[(&str, &str)])
        -> Result<Vec<u8>, CongressApiError>;
}

/// HTTP-based implementation of `CongressApiClient`.
pub struct HttpCongressClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKeySource,
    retry: RetryPolicy,
}

impl HttpCongressClient {
    /// Create a new client with the given base URL and key source.
    pub fn new(base_url: impl Into<String>, api_key: ApiKeySource) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: ApiKeySource,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn build_url(
        &self,
        path: &str,
        params: &[(&str, &str)],
        api_key: &str,
    ) -> Result<reqwest::Url, CongressApiError> {
        let mut url = reqwest::Url::parse(&format!("{}{path}", self.base_url)).map_err(|e| {
            CongressApiError::Config(format!("invalid API url '{}{path}': {e}", self.base_url))
        })?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("api_key", api_key);
        }

        Ok(url)
    }

    async fn send_with_retries(
        &self,
        url: reqwest::Url,
    ) -> Result<(reqwest::Response, u32), CongressApiError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = self
                .client
                .get(url.clone())
                .timeout(self.retry.request_timeout)
                .send()
                .await;

            // reqwest errors embed the URL, which carries the API key
            match result.map_err(reqwest::Error::without_url) {
                Ok(response) => return Ok((response, attempt)),
                Err(source) if attempt >= max_attempts => {
                    return Err(CongressApiError::Transport {
                        attempts: attempt,
                        source,
                    });
                }
                Err(e) => {
                    let delay = self.retry.backoff_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "congress API request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Read at most [`MAX_ERROR_BODY_BYTES`] of an error response body.
async fn read_error_snippet(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) | Err(_) => break,
        }
    }
    body.truncate(MAX_ERROR_BODY_BYTES);
    String::from_utf8_lossy(&body).into_owned()
}

#[async_trait]
impl CongressApiClient for HttpCongressClient {
    async fn fetch(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<u8>, CongressApiError> {
        let api_key = self.api_key.resolve()?;
        let url = self.build_url(path, params, &api_key)?;

        let (response, attempts) = self.send_with_retries(url).await?;
        let status = response.status();

        if !status.is_success() {
            let body = read_error_snippet(response).await;
            tracing::warn!(status = status.as_u16(), path, "congress API returned error status");
            return Err(CongressApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CongressApiError::Transport {
                attempts,
                source: source.without_url(),
            })?;

        tracing::debug!(path, attempts, bytes = body.len(), "congress API response received");
        Ok(body.to_vec())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{CongressApiClient, CongressApiError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A recorded `fetch` call: path plus query parameters.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FetchCall {
        pub path: String,
        pub params: Vec<(String, String)>,
    }

    /// Mock implementation of `CongressApiClient` for unit tests.
    ///
    /// Queue responses with `push_*` methods and verify calls with `calls()`.
    /// When the queue is empty, `fetch` answers with a `Schema` error.
    pub struct MockCongressClient {
        results: Mutex<VecDeque<Result<Vec<u8>, CongressApiError>>>,
        calls: Mutex<Vec<FetchCall>>,
    }

    impl MockCongressClient {
        pub fn new() -> Self {
            Self {
                results: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue a successful response with the given JSON body.
        pub fn push_json(&self, body: &serde_json::Value) {
            self.push_result(Ok(body.to_string().into_bytes()));
        }

        /// Queue an arbitrary result.
        pub fn push_result(&self, result: Result<Vec<u8>, CongressApiError>) {
            self.results.lock().unwrap().push_back(result);
        }

        /// Get all recorded `fetch` calls.
        pub fn calls(&self) -> Vec<FetchCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCongressClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CongressApiClient for MockCongressClient {
        async fn fetch(
            &self,
            path: &str,
            params: &[(&str, &str)],
        ) -> Result<Vec<u8>, CongressApiError> {
            self.calls.lock().unwrap().push(FetchCall {
                path: path.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            });

            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CongressApiError::Schema("no mock response queued".into())))
        }
    }
}
