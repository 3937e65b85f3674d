mod config;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-builder v{}", env!("CARGO_PKG_VERSION"));

    match &config.skill_keywords {
        Some(keywords) => info!(count = keywords.len(), "Using configured skill keywords"),
        None => info!("Using built-in skill keywords"),
    }

    let state = AppState::new(config.clone());

    // Background eviction of abandoned sessions
    let ttl = state.config.session_idle_ttl;
    let period = state.config.session_sweep_interval;
    state.sessions.spawn_idle_sweeper(ttl, period);
    info!(
        idle_ttl_secs = ttl.as_secs(),
        sweep_every_secs = period.as_secs(),
        "Session sweeper started"
    );

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
