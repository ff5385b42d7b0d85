use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use papi::api;
use papi::config::Config;
use papi::models::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let shared_state = Arc::new(AppState::new());

    let app = api::app(shared_state);

    // Bind failure is fatal: no retry, exit with the diagnostic.
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to port {}", config.port))?;

    tracing::info!(
        "P-API v{} started on port {} ({})",
        env!("CARGO_PKG_VERSION"),
        config.port,
        config.env
    );

    // The peer address feeds the per-IP rate limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
