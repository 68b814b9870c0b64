//! REST API handlers and `OpenAPI` documentation.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::congress::{Jurisdiction, Member, RepresentativeSource, JURISDICTIONS};

/// Shared handle to the configured representative source.
pub type SharedSource = Arc<dyn RepresentativeSource>;

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
}

impl ProblemDetails {
    /// Create a bad request response.
    #[must_use]
    pub fn bad_request(detail: &str) -> Self {
        Self {
            problem_type: "about:blank#bad-request".to_string(),
            title: "Bad Request".to_string(),
            status: StatusCode::BAD_REQUEST,
            detail: detail.to_string(),
        }
    }

    /// Create an internal server error response.
    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self {
            problem_type: "about:blank#internal".to_string(),
            title: "Internal Server Error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// Query parameters for the representatives endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RepresentativesQuery {
    /// Two-letter state code, case-insensitive (e.g., "NY")
    pub state: Option<String>,
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Representative Finder API",
        version = "1.0.0",
        description = "Current members of Congress by state",
        license(name = "MIT")
    ),
    paths(list_states, list_representatives),
    components(schemas(Jurisdiction, Member, ProblemDetails))
)]
pub struct ApiDoc;

/// List jurisdictions
///
/// Returns the 50 states and DC with their two-letter codes.
#[utoipa::path(
    get,
    path = "/states",
    tag = "Lookup",
    responses(
        (status = 200, description = "All supported jurisdictions", body = [Jurisdiction])
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_states() -> Json<&'static [Jurisdiction]> {
    Json(JURISDICTIONS)
}

/// List current representatives for a state
///
/// Unknown state codes return an empty list.
///
/// # Errors
///
/// Returns `ProblemDetails` when the `state` parameter is missing or the
/// lookup fails. Lookup failure details are logged, not returned.
#[utoipa::path(
    get,
    path = "/representatives",
    tag = "Lookup",
    params(RepresentativesQuery),
    responses(
        (status = 200, description = "Current members for the state", body = [Member]),
        (status = 400, description = "Missing state parameter", body = ProblemDetails),
        (status = 500, description = "Lookup failed", body = ProblemDetails)
    )
)]
pub async fn list_representatives(
    Extension(source): Extension<SharedSource>,
    Query(query): Query<RepresentativesQuery>,
) -> Result<Json<Vec<Member>>, ProblemDetails> {
    let state = query.state.unwrap_or_default().trim().to_ascii_uppercase();
    if state.is_empty() {
        return Err(ProblemDetails::bad_request(
            "missing required 'state' query parameter (e.g. ?state=NY)",
        ));
    }

    match source.representatives(&state).await {
        Ok(members) => Ok(Json(members)),
        Err(e) => {
            tracing::error!(state = %state, kind = e.kind(), error = %e, "representative lookup failed");
            Err(ProblemDetails::internal_error(
                "internal server error while fetching representatives",
            ))
        }
    }
}
