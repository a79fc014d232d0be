// Customer Dashboard - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use customer_dashboard::server::{router, AppState};
use customer_dashboard::{source, Dashboard, DEFAULT_SOURCE};

#[derive(Parser, Debug)]
#[command(version, about = "Serve the customer transactions dashboard")]
struct Args {
    /// Path or http(s) URL of customer.json
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: String,

    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let source = source::open(&args.source)?;
    let state = AppState::new(Dashboard::new(), Arc::from(source));

    // Failures are logged; the page then renders empty
    state.reload().await;

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("failed to bind to {}", args.addr))?;

    info!("server running on http://{}", args.addr);

    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
