//! Common test utilities for integration tests.
//!
//! This module provides:
//!
//! - [`http_mock::MockHttpServer`] - Declarative HTTP stubbing for the Congress.gov API
//! - [`fixtures`] - Upstream payloads and client helpers shared across test files
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//!
//! use common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_with_stubbed_api() {
//!     let server = MockHttpServer::start().await;
//!     server.expect_get("/member/TN").respond_with_json(json!({"members": []})).mount().await;
//! }
//! ```

#![allow(dead_code)]

pub mod http_mock;

pub mod fixtures {
    use std::time::Duration;

    use repfinder_api::congress::{ApiKeySource, HttpCongressClient, RetryPolicy};
    use serde_json::{json, Value};

    pub const TEST_API_KEY: &str = "test-api-key";

    /// Retry policy with short delays so failure paths finish quickly.
    pub const fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff_step: Duration::from_millis(10),
            request_timeout: Duration::from_millis(500),
        }
    }

    /// Client pointed at `base_url` with the test key and fast retries.
    pub fn client(base_url: impl Into<String>) -> HttpCongressClient {
        HttpCongressClient::new(base_url, ApiKeySource::fixed(TEST_API_KEY))
            .with_retry_policy(fast_retry())
    }

    /// A base URL nothing is listening on.
    pub fn dead_base_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    /// Tennessee page: one sitting senator, one former senator, one member
    /// from another state.
    pub fn tennessee_members() -> Value {
        json!({
            "request": {"contentType": "application/json", "format": "json"},
            "pagination": {"count": 3, "next": null},
            "members": [
                {
                    "bioguideId": "B001243",
                    "name": "Blackburn, Marsha",
                    "state": "Tennessee",
                    "partyName": "Republican",
                    "depiction": {"imageUrl": "https://www.congress.gov/img/member/b001243.jpg"},
                    "terms": {"item": [
                        {"chamber": "House of Representatives", "startYear": 2003, "endYear": 2019},
                        {"chamber": "Senate", "startYear": 2019}
                    ]}
                },
                {
                    "bioguideId": "A000360",
                    "name": "Alexander, Lamar",
                    "state": "Tennessee",
                    "partyName": "Republican",
                    "terms": {"item": [
                        {"chamber": "Senate", "startYear": 2003, "endYear": 2021}
                    ]}
                },
                {
                    "bioguideId": "M000355",
                    "name": "McConnell, Mitch",
                    "state": "Kentucky",
                    "partyName": "Republican",
                    "terms": {"item": [{"chamber": "Senate", "startYear": 1985}]}
                }
            ]
        })
    }
}
