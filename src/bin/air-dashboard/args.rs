use std::{net::SocketAddr, time::Duration};

use anyhow::{Context as _, Result};
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use clap::Parser;
use pi_air::config::{Config, DEFAULT_FETCH_LIMIT, HistoricalRange};

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "TZ", default_value = "Asia/Taipei")]
    pub timezone: Tz,

    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8050")]
    pub bind: SocketAddr,

    /// Seconds since the newest reading before the sensor is reported offline.
    #[arg(long, default_value_t = 300)]
    pub freshness_secs: u32,

    #[arg(long, default_value_t = DEFAULT_FETCH_LIMIT)]
    pub fetch_limit: u32,

    #[arg(long, default_value_t = 3)]
    pub panel_interval_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub main_interval_secs: u64,

    #[arg(long, default_value_t = 12)]
    pub minute_back_hours: u32,

    /// Pin the minute charts to a fixed range starting here (RFC 3339).
    #[arg(long)]
    pub history_start: Option<DateTime<Utc>>,

    /// Length of the pinned range in days, may be fractional.
    #[arg(long, default_value_t = 2.2, requires = "history_start")]
    pub history_days: f64,
}

impl Args {
    pub fn into_config(self) -> Result<Config> {
        let history = self
            .history_start
            .map(|start| HistoricalRange::from_days(start, self.history_days))
            .transpose()
            .context("invalid --history-days")?;

        let freshness_window = TimeDelta::try_seconds(self.freshness_secs.into())
            .context("--freshness-secs out of range")?;
        let minute_back_window = TimeDelta::try_hours(self.minute_back_hours.into())
            .context("--minute-back-hours out of range")?;

        Ok(Config {
            timezone: self.timezone,
            freshness_window,
            fetch_limit: self.fetch_limit,
            panel_interval: Duration::from_secs(self.panel_interval_secs),
            main_interval: Duration::from_secs(self.main_interval_secs),
            minute_back_window,
            history,
            ..Config::new(self.database_url)
        })
    }
}
