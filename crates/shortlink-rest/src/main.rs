//! Shortlink REST service entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shortlink_rest::config::AppConfig;
use shortlink_rest::{AppState, build_router};
use tracing::info;

/// Shortlink REST API server.
#[derive(Parser, Debug)]
#[command(name = "shortlink-rest", about = "Shortlink REST API server")]
struct Args {
    /// Listen port; overrides `REST_PORT`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.listen_port = port;
    }

    info!(
        validate_url = config.url_shortener.validate_url,
        short_code_length = config.url_shortener.short_code_length,
        short_domain = %config.short_domain,
        admin = %config.admin.username,
        token_ttl_minutes = config.token_ttl_minutes,
        "configuration loaded"
    );

    let state = Arc::new(AppState::from_config(&config));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(address = %addr, "REST service listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
