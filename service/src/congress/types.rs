//! Data types for Congress.gov member records and the client-facing shape.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A currently serving member of Congress, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Bioguide ID (e.g., "A000360")
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Party label (e.g., "(R)", "(D)"), empty when unknown
    pub party: String,
    /// Office label (e.g., "Senator", "District 5 Rep.")
    pub district: String,
}

/// A member record as the Congress.gov API reports it.
///
/// Missing fields default rather than fail; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMember {
    #[serde(default)]
    pub bioguide_id: String,
    /// Combined name in "Last, First Middle" form
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub terms: ApiTerms,
    /// Full state name (e.g., "Tennessee"), not the code
    #[serde(default)]
    pub state: String,
    /// 0, null or missing for senators and at-large seats
    #[serde(default, deserialize_with = "null_as_zero")]
    pub district: u32,
    #[serde(default, rename = "partyName")]
    pub party: String,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

/// The nested `terms` object; the API wraps the list in an `item` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiTerms {
    #[serde(default)]
    pub item: Vec<ApiTerm>,
}

/// A single term of service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiTerm {
    /// "House of Representatives" or "Senate"
    #[serde(default)]
    pub chamber: String,
    #[serde(default)]
    pub start_year: u16,
    /// `None` while the term is ongoing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<u16>,
}

/// A jurisdiction code and its display name.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
pub struct Jurisdiction {
    /// Two-letter code (e.g., "NY")
    pub code: &'static str,
    /// Full name as the upstream API spells it (e.g., "New York")
    pub name: &'static str,
}
