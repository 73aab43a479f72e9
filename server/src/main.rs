use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use task_matrix_server::config::Config;
use task_matrix_server::{build_router, AppState};

/// Task Matrix web server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    /// Static asset directory, overrides PUBLIC_DIR
    #[arg(long)]
    public_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = args.public_dir {
        config.public_dir = dir;
    }

    rolling_logger::init_logger(&config.log_dir, "TaskMatrix").context("failed to start logging")?;
    if !config.oauth_enabled() {
        tracing::warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set; sign-in is disabled");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let base_url = config.base_url.clone();
    let router = build_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Task Matrix listening on {} ({})", addr, base_url);
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
