//! Representative lookup by jurisdiction code.
//!
//! [`RepresentativeSource`] is the single capability the HTTP layer depends
//! on. [`LiveRepresentatives`] answers from Congress.gov through the cache;
//! [`MockRepresentatives`] answers from a canned table. The choice is made
//! once at startup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::cache::MemberCache;
use super::client::{CongressApiClient, CongressApiError};
use super::decode::decode_members;
use super::jurisdictions;
use super::normalize::normalize;
use super::types::Member;

/// Default number of upstream records requested per lookup.
pub const DEFAULT_PAGE_LIMIT: u32 = 75;

/// Default validity window for cached lookups.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Source of current members for a jurisdiction.
#[async_trait]
pub trait RepresentativeSource: Send + Sync {
    /// Current members for `code`, in upstream order.
    ///
    /// Unknown codes yield an empty list, not an error.
    async fn representatives(&self, code: &str) -> Result<Vec<Member>, CongressApiError>;
}

/// Looks members up on Congress.gov, caching results per jurisdiction.
pub struct LiveRepresentatives {
    client: Arc<dyn CongressApiClient>,
    cache: Arc<MemberCache>,
    page_limit: u32,
    cache_ttl: Duration,
}

impl LiveRepresentatives {
    pub fn new(client: Arc<dyn CongressApiClient>, cache: Arc<MemberCache>) -> Self {
        Self {
            client,
            cache,
            page_limit: DEFAULT_PAGE_LIMIT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }
}

#[async_trait]
impl RepresentativeSource for LiveRepresentatives {
    async fn representatives(&self, code: &str) -> Result<Vec<Member>, CongressApiError> {
        let Some(jurisdiction) = jurisdictions::find(code) else {
            tracing::debug!(code, "unknown jurisdiction code");
            return Ok(Vec::new());
        };
        let key = jurisdiction.code.to_string();

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(code = jurisdiction.code, "member cache hit");
            return Ok(cached.to_vec());
        }

        let path = format!("/member/{}", urlencoding::encode(jurisdiction.code));
        let limit = self.page_limit.to_string();
        let raw = self
            .client
            .fetch(&path, &[("format", "json"), ("limit", limit.as_str())])
            .await?;

        let members: Vec<Member> = decode_members(&raw)?
            .iter()
            .filter(|api_member| api_member.state == jurisdiction.name)
            .filter_map(normalize)
            .collect();

        tracing::info!(
            code = jurisdiction.code,
            count = members.len(),
            "fetched current members"
        );

        self.cache.set(key, members.clone().into(), self.cache_ttl);
        Ok(members)
    }
}

/// Answers from a fixed table of sample members. Not real representatives.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRepresentatives;

fn mock_member(id: &str, first_name: &str, last_name: &str, party: &str, district: &str) -> Member {
    Member {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        party: party.to_string(),
        district: district.to_string(),
    }
}

impl MockRepresentatives {
    fn members_for(code: &str) -> Vec<Member> {
        match code {
            "NY" => vec![
                mock_member("rep-ny-1", "Alex", "Johnson", "(D)", "District 1 Rep."),
                mock_member("rep-ny-2", "Riley", "Martinez", "(R)", "District 2 Rep."),
            ],
            "CA" => vec![
                mock_member("rep-ca-12", "Morgan", "Lee", "(D)", "District 12 Rep."),
                mock_member("rep-ca-14", "Taylor", "Nguyen", "(D)", "District 14 Rep."),
            ],
            "TX" => vec![mock_member("rep-tx-7", "Sam", "Williams", "(R)", "District 7 Rep.")],
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl RepresentativeSource for MockRepresentatives {
    async fn representatives(&self, code: &str) -> Result<Vec<Member>, CongressApiError> {
        Ok(Self::members_for(&jurisdictions::normalize_code(code)))
    }
}
