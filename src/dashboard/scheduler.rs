use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Interval, MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::{
    chart::Variant,
    dashboard::{Dashboard, Panel},
    db::ReadingStore,
    status::Status,
};

/// Latest successfully refreshed values. `None` until the first successful tick.
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub status: watch::Receiver<Option<Status>>,
    pub panel: watch::Receiver<Option<Panel>>,
    pub main: watch::Receiver<Option<Panel>>,
}

/// Drives the two refresh timers. The fast one refreshes the status and the chart
/// panel, the slow one the main charts. Dropping the scheduler stops both.
#[derive(Debug)]
pub struct RefreshScheduler {
    fast: JoinHandle<()>,
    slow: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn spawn<S>(dashboard: Arc<Dashboard<S>>) -> (Self, Snapshots)
    where
        S: ReadingStore + 'static,
    {
        let (status_tx, status) = watch::channel(None);
        let (panel_tx, panel) = watch::channel(None);
        let (main_tx, main) = watch::channel(None);

        let panel_interval = dashboard.config().panel_interval;
        let main_interval = dashboard.config().main_interval;
        info!(?panel_interval, ?main_interval, "starting refresh timers");

        let fast = tokio::spawn({
            let dashboard = Arc::clone(&dashboard);
            async move {
                let mut ticker = ticker(panel_interval);
                let mut tick: u64 = 0;
                loop {
                    ticker.tick().await;
                    tick += 1;

                    publish(&status_tx, tick, "status", dashboard.status(Utc::now()).await);
                    publish(
                        &panel_tx,
                        tick,
                        "panel charts",
                        dashboard.charts(Variant::Panel).await,
                    );
                }
            }
        });

        let slow = tokio::spawn(async move {
            let mut ticker = ticker(main_interval);
            let mut tick: u64 = 0;
            loop {
                ticker.tick().await;
                tick += 1;

                publish(
                    &main_tx,
                    tick,
                    "main charts",
                    dashboard.charts(Variant::Main).await,
                );
            }
        });

        let snapshots = Snapshots {
            status,
            panel,
            main,
        };

        (Self { fast, slow }, snapshots)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.fast.abort();
        self.slow.abort();
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// A failed tick leaves the previous value in place.
fn publish<T>(tx: &watch::Sender<Option<T>>, tick: u64, what: &str, result: Result<T>) {
    match result {
        Ok(value) => {
            tx.send_replace(Some(value));
            debug!(tick, "refreshed {what}");
        }
        Err(err) => warn!(tick, "failed to refresh {what}: {err:#}"),
    }
}
