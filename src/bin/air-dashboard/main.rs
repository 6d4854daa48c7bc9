mod args;
mod server;

use std::{process::ExitCode, sync::Arc};

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use pi_air::{
    dashboard::{Dashboard, RefreshScheduler},
    db::new_pool,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::server::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let bind = args.bind;
    let config = args.into_config().context("invalid configuration")?;

    let pool = new_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let dashboard = Arc::new(Dashboard::new(pool, config));
    let (_scheduler, snapshots) = RefreshScheduler::spawn(Arc::clone(&dashboard));

    let app = server::router(AppState {
        dashboard,
        snapshots,
    });

    server::serve(bind, app).await
}
