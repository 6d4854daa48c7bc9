use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::db::MinuteWindow;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Taipei;
pub const DEFAULT_FETCH_LIMIT: u32 = 180;

/// Runtime settings shared by the store, the chart builder and the scheduler.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    /// Zone readings are displayed in. Readings are stored as UTC.
    pub timezone: Tz,

    /// Maximum age of the newest reading for the sensor to count as online. Inclusive.
    pub freshness_window: TimeDelta,

    pub fetch_limit: u32,

    pub panel_interval: Duration,

    pub main_interval: Duration,

    pub minute_back_window: TimeDelta,

    /// Pins the minute-aggregate read to a fixed range instead of the back window.
    pub history: Option<HistoricalRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalRange {
    pub start: DateTime<Utc>,
    pub span: TimeDelta,
}

impl HistoricalRange {
    /// `days` may be fractional. Negative, non-finite and unrepresentable spans are rejected.
    pub fn from_days(start: DateTime<Utc>, days: f64) -> Result<Self> {
        if !days.is_finite() || days < 0.0 {
            bail!("history span must be a non-negative number of days, got {days}");
        }

        let millis = (days * 86_400_000.0).round();
        if millis >= i64::MAX as f64 {
            bail!("history span out of range: {days} days");
        }

        let span = TimeDelta::try_milliseconds(millis as i64)
            .with_context(|| format!("history span out of range: {days} days"))?;

        Ok(Self { start, span })
    }
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            timezone: DEFAULT_TIMEZONE,
            freshness_window: TimeDelta::minutes(5),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            panel_interval: Duration::from_secs(3),
            main_interval: Duration::from_secs(30),
            minute_back_window: TimeDelta::hours(12),
            history: None,
        }
    }

    /// Window bounds saturate at the representable date range.
    pub fn minute_window(&self, now: DateTime<Utc>) -> MinuteWindow {
        match self.history {
            Some(HistoricalRange { start, span }) => MinuteWindow::Between(
                start,
                start
                    .checked_add_signed(span)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ),
            None => MinuteWindow::Since(
                now.checked_sub_signed(self.minute_back_window)
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
        }
    }
}
