//! HTTP router wiring shared by the server binary and integration tests.

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{CorsConfig, SwaggerConfig};
use crate::rest::{self, ApiDoc, SharedSource};

// Health check handler
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

// Plain OPTIONS without preflight headers; real preflights are answered by the CORS layer
async fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Build the CORS layer for the configured origins.
///
/// `"*"` anywhere in the list allows any origin; an empty list blocks all
/// cross-origin requests.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors_origins = &config.allowed_origins;
    let allow_origin: AllowOrigin = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if cors_origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?cors_origins, "CORS allowed origins configured");
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

/// Build the application router around a representative source.
pub fn build_router(source: SharedSource, cors: &CorsConfig, swagger: &SwaggerConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/states", get(rest::list_states).options(no_content))
        .route(
            "/representatives",
            get(rest::list_representatives).options(no_content),
        )
        .layer(Extension(source));

    if swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()));
    }

    app.layer(cors_layer(cors)).layer(TraceLayer::new_for_http())
}
