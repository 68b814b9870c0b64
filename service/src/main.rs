#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::{net::SocketAddr, sync::Arc};

use repfinder_api::{
    config::{Config, DataMode},
    congress::{
        ApiKeySource, HttpCongressClient, LiveRepresentatives, MemberCache, MockRepresentatives,
    },
    http::build_router,
    rest::SharedSource,
};
use tracing_subscriber::EnvFilter;

/// Pick the data source once, based on the configured mode.
fn build_source(config: &Config) -> SharedSource {
    match config.mode {
        DataMode::Mock => {
            tracing::info!("using mock representative data");
            Arc::new(MockRepresentatives)
        }
        DataMode::Real => {
            let congress = &config.congress;
            let api_key = ApiKeySource::env(&congress.api_key_env);
            if api_key.resolve().is_err() {
                tracing::warn!(
                    var = %congress.api_key_env,
                    "API key not set; live lookups will fail until it is"
                );
            }

            let client = HttpCongressClient::new(&congress.base_url, api_key)
                .with_retry_policy(congress.retry_policy());

            tracing::info!(base_url = %congress.base_url, "using live Congress.gov data");
            Arc::new(
                LiveRepresentatives::new(Arc::new(client), Arc::new(MemberCache::new()))
                    .with_page_limit(congress.page_limit)
                    .with_cache_ttl(congress.cache_ttl()),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up logging from config; RUST_LOG still wins when present
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = ?config.mode,
        "repfinder-api starting up"
    );

    let source = build_source(&config);
    let app = build_router(source, &config.cors, &config.swagger);

    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);
    tracing::info!("Starting server at http://{}/representatives", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
