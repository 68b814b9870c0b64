//! Congress member lookup module.
//!
//! Fetches member records from the Congress.gov directory, normalizes them
//! into the client shape and caches the result per jurisdiction.
//!
//! # Architecture
//!
//! The module uses a trait-based design for testability:
//!
//! - [`CongressApiClient`] - Trait defining the raw fetch operation
//! - [`HttpCongressClient`] - Real HTTP implementation using reqwest, with retries
//! - [`decode_members`] - Finds the data array in a list response
//! - [`normalize`] - Turns one upstream record into zero or one [`Member`]
//! - [`MemberCache`] - TTL cache shared by lookups
//! - [`RepresentativeSource`] - Lookup capability, with [`LiveRepresentatives`]
//!   and [`MockRepresentatives`] implementations
//! - [`mock::MockCongressClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use repfinder_api::congress::mock::MockCongressClient;
//!
//! let mock = Arc::new(MockCongressClient::new());
//! mock.push_json(&json!({"members": [ ... ]}));
//!
//! let source = LiveRepresentatives::new(mock.clone(), Arc::new(MemberCache::new()));
//! let members = source.representatives("TN").await?;
//! assert_eq!(mock.calls().len(), 1);
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/member/TN")
//!     .with_query_param("api_key", "test-key")
//!     .respond_with_json(json!({"members": [ ... ]}))
//!     .mount()
//!     .await;
//!
//! let client = HttpCongressClient::new(server.url(), ApiKeySource::fixed("test-key"));
//! ```

mod cache;
mod client;
mod decode;
mod jurisdictions;
mod lookup;
mod normalize;
mod types;

pub use cache::{MemberCache, TtlCache};
pub use client::{
    ApiKeySource, CongressApiClient, CongressApiError, HttpCongressClient, RetryPolicy,
    MAX_ERROR_BODY_BYTES,
};
pub use decode::{decode_members, METADATA_FIELDS};
pub use jurisdictions::{find as find_jurisdiction, normalize_code, JURISDICTIONS};
pub use lookup::{
    LiveRepresentatives, MockRepresentatives, RepresentativeSource, DEFAULT_CACHE_TTL,
    DEFAULT_PAGE_LIMIT,
};
pub use normalize::{district_label, normalize, party_label, split_name};
pub use types::{ApiMember, ApiTerm, ApiTerms, Jurisdiction, Member};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
