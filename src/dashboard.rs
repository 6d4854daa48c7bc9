mod scheduler;

pub use scheduler::*;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    chart::{ChartBuilder, ChartDescriptor, Variant},
    config::Config,
    db::ReadingStore,
    liveness::is_online,
    status::Status,
};

/// One rendered chart panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub variant: Variant,
    pub charts: Vec<ChartDescriptor>,
}

/// The per-tick operations the host calls: fetch, then transform.
#[derive(Debug)]
pub struct Dashboard<S> {
    store: S,
    config: Config,
    builder: ChartBuilder,
}

impl<S: ReadingStore> Dashboard<S> {
    pub fn new(store: S, config: Config) -> Self {
        let builder = ChartBuilder::new(config.timezone);
        Self {
            store,
            config,
            builder,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn status(&self, now: DateTime<Utc>) -> Result<Status> {
        let online = is_online(&self.store, now, self.config.freshness_window)
            .await
            .context("failed to check sensor liveness")?;

        Ok(Status::new(online))
    }

    /// Charts of the most recent `fetch_limit` readings. Both variants read the same window.
    pub async fn charts(&self, variant: Variant) -> Result<Panel> {
        let readings = self
            .store
            .fetch_recent(Some(self.config.fetch_limit))
            .await
            .context("failed to fetch recent readings")?;

        Ok(Panel {
            variant,
            charts: self.builder.build(&readings, variant),
        })
    }

    /// Charts of the minute-aggregate table over the configured window.
    pub async fn minute_charts(&self, now: DateTime<Utc>) -> Result<Panel> {
        let window = self.config.minute_window(now);
        let readings = self
            .store
            .fetch_minute(window)
            .await
            .with_context(|| format!("failed to fetch minute readings: {window:?}"))?;

        Ok(Panel {
            variant: Variant::Main,
            charts: self.builder.build(&readings, Variant::Main),
        })
    }
}
