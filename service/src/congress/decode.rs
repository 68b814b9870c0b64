//! Decoder for Congress.gov list responses.
//!
//! Every list endpoint wraps its payload as
//! `{"request": {...}, "pagination": {...}, "<name>": [...]}` where `<name>`
//! depends on the endpoint ("members", "bills", ...). The data field is found
//! by elimination rather than by name.

use serde_json::{Map, Value};

use super::client::CongressApiError;
use super::types::ApiMember;

/// Top-level fields that carry response metadata, never data.
pub const METADATA_FIELDS: &[&str] = &["request", "pagination"];

/// Extract the member list from a raw response body.
///
/// Non-array fields outside [`METADATA_FIELDS`] are ignored, except `null`,
/// which reads as an empty list. When several candidates remain, the
/// lexicographically first name wins.
///
/// # Errors
/// Returns [`CongressApiError::Schema`] if the body is not a JSON object, has
/// no data array, or the data array does not hold member records.
pub fn decode_members(raw: &[u8]) -> Result<Vec<ApiMember>, CongressApiError> {
    let top: Map<String, Value> = serde_json::from_slice(raw)
        .map_err(|e| CongressApiError::Schema(format!("invalid json structure: {e}")))?;

    let (field, data) = data_field(top).ok_or_else(|| {
        CongressApiError::Schema("no member data array found in API response".into())
    })?;

    serde_json::from_value(data).map_err(|e| {
        CongressApiError::Schema(format!(
            "failed to decode members from field '{field}': {e}"
        ))
    })
}

fn data_field(top: Map<String, Value>) -> Option<(String, Value)> {
    let mut candidates: Vec<(String, Value)> = top
        .into_iter()
        .filter(|(key, value)| {
            !METADATA_FIELDS.contains(&key.as_str()) && (value.is_array() || value.is_null())
        })
        .map(|(key, value)| match value {
            Value::Null => (key, Value::Array(Vec::new())),
            other => (key, other),
        })
        .collect();

    candidates.sort_by(|(a, _), (b, _)| a.cmp(b));
    candidates.into_iter().next()
}
