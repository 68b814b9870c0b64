//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing. Use it to mock Congress.gov responses in integration tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/member/TN")
//!         .with_query_param("api_key", "test-api-key")
//!         .respond_with_json(json!({"members": []}))
//!         .expect_times(1)
//!         .mount()
//!         .await;
//!
//!     // Point the client at server.url()
//!     server.verify().await;
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(503)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` to assert call count

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wrapper around a `wiremock` server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server, without trailing slash.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying server for matchers this wrapper does not cover.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Start describing a stub for `GET path`.
    pub fn expect_get(&self, path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            path: path.to_string(),
            query: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Assert that every mounted stub saw its expected number of calls.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Number of requests the server has received so far.
    pub async fn received_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

enum StubBody {
    Json(Value),
    Text(String),
}

/// Builder for a single stubbed GET endpoint.
pub struct StubBuilder<'a> {
    server: &'a MockServer,
    path: String,
    query: Vec<(String, String)>,
    status: u16,
    body: Option<StubBody>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    /// Only match requests carrying this query parameter.
    pub fn with_query_param(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(StubBody::Json(body));
        self
    }

    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(StubBody::Text(body.into()));
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Require exactly `times` matching requests by the time of `verify`.
    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut matcher = Mock::given(method("GET")).and(path(self.path.as_str()));
        for (key, value) in &self.query {
            matcher = matcher.and(query_param(key.as_str(), value.as_str()));
        }

        let mut response = ResponseTemplate::new(self.status);
        response = match self.body {
            Some(StubBody::Json(body)) => response.set_body_json(body),
            Some(StubBody::Text(body)) => response.set_body_string(body),
            None => response,
        };
        if let Some(delay) = self.delay {
            response = response.set_delay(delay);
        }

        let mut mock = matcher.respond_with(response);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
