mod advertise;
mod config;
mod net;
mod pages;
mod routes;
mod state;
mod storage;

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{Cli, Config},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "quickshare=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_cli(Cli::parse()).context("invalid configuration")?;

    let base = advertise::base_url(net::local_ip(), cfg.port);
    let share = advertise::share_url(&base, cfg.password.as_deref());
    advertise::print_banner(&cfg, &base, &share);

    let state = AppState::new(cfg.root.clone(), cfg.password.clone());
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(cfg.host, cfg.port);
    tracing::info!(root = ?cfg.root, protected = cfg.password.is_some(), bind = %addr, "QuickShare starting");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
