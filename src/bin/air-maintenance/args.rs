use anyhow::{Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use pi_air::db::PurgeScope;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or upgrade the reading tables.
    Migrate,

    /// Delete readings from `air` and `tgs`.
    Purge(PurgeArgs),
}

#[derive(Debug, ClapArgs)]
#[group(required = true, multiple = false)]
pub struct PurgeArgs {
    /// Keep readings from the last N days.
    #[arg(long)]
    pub retain_days: Option<u32>,

    /// Delete every reading.
    #[arg(long)]
    pub all: bool,
}

impl PurgeArgs {
    pub fn scope(&self) -> Result<PurgeScope> {
        match (self.retain_days, self.all) {
            (Some(days), false) => Ok(PurgeScope::RetainDays(days)),
            (None, true) => Ok(PurgeScope::All),
            _ => bail!("exactly one of --retain-days or --all is required"),
        }
    }
}
