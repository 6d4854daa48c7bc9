mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::{Args, Command, PurgeArgs};
use chrono::Utc;
use clap::Parser as _;
use pi_air::db::{new_pool, purge_readings};
use sqlx::PgPool;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

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

    let pool = new_pool(&args.database_url)
        .await
        .context("failed to connect to database")?;

    match args.command {
        Command::Migrate => migrate(&pool).await,
        Command::Purge(purge) => run_purge(&pool, purge).await,
    }
}

async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run migrations")?;

    info!("migrations applied");

    Ok(())
}

async fn run_purge(pool: &PgPool, args: PurgeArgs) -> Result<()> {
    let scope = args.scope()?;
    let now = Utc::now();

    let summary = purge_readings(pool, scope, now)
        .await
        .context("failed to purge readings")?;

    match scope.cutoff(now) {
        Some(cutoff) => info!(%cutoff, air = summary.air, tgs = summary.tgs, "purged old readings"),
        None => info!(air = summary.air, tgs = summary.tgs, "cleared all readings"),
    }

    Ok(())
}
