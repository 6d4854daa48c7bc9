use std::future::Future;

use anyhow::{Context as _, Result};
use chrono::{DateTime, TimeDelta, Utc};
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions};
use tracing::{debug, warn};

use crate::air::{Metric, Reading, ReadingError};

/// Read access to stored readings. Every read is ordered newest insertion first.
pub trait ReadingStore: Send + Sync {
    /// Up to `limit` most recent readings from the primary table, or all of them.
    fn fetch_recent(
        &self,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<Vec<Reading>>> + Send;

    /// Readings from the minute-aggregate table inside `window`.
    fn fetch_minute(
        &self,
        window: MinuteWindow,
    ) -> impl Future<Output = Result<Vec<Reading>>> + Send;

    /// Timestamp of the most recently inserted reading.
    fn latest_reading_at(&self) -> impl Future<Output = Result<Option<DateTime<Utc>>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinuteWindow {
    Since(DateTime<Utc>),
    /// Inclusive on both ends.
    Between(DateTime<Utc>, DateTime<Utc>),
}

#[derive(Debug, Clone, FromRow)]
pub struct ReadingRow {
    pub id: i64,
    pub at: DateTime<Utc>,
    pub voc_ccs: Option<f64>,
    pub voc_tgs: Option<f64>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
}

impl TryFrom<ReadingRow> for Reading {
    type Error = ReadingError;

    fn try_from(row: ReadingRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let require = |value: Option<f64>, metric: Metric| {
            value.ok_or(ReadingError::MissingMetric { id, metric })
        };

        Ok(Reading {
            id,
            at: row.at,
            voc_ccs: require(row.voc_ccs, Metric::VocCcs)?,
            voc_tgs: require(row.voc_tgs, Metric::VocTgs)?,
            pm25: require(row.pm25, Metric::Pm25)?,
            pm10: require(row.pm10, Metric::Pm10)?,
        })
    }
}

/// Converts rows, dropping the ones that cannot be charted.
pub fn validate_rows(rows: Vec<ReadingRow>) -> Vec<Reading> {
    rows.into_iter()
        .filter_map(|row| match Reading::try_from(row) {
            Ok(reading) => Some(reading),
            Err(err) => {
                warn!("skipping malformed reading: {err}");
                None
            }
        })
        .collect()
}

pub async fn new_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .connect(database_url)
        .await
        .context("failed to open connection pool")?;

    Ok(pool)
}

impl ReadingStore for PgPool {
    async fn fetch_recent(&self, limit: Option<u32>) -> Result<Vec<Reading>> {
        // LIMIT NULL is LIMIT ALL
        let rows: Vec<ReadingRow> = sqlx::query_as(
            r#"
            SELECT id, at, voc_ccs, voc_tgs, pm25, pm10
            FROM air
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.map(i64::from))
        .fetch_all(self)
        .await
        .context("failed to execute recent readings query")?;

        if rows.is_empty() {
            debug!("no readings in air");
        }

        Ok(validate_rows(rows))
    }

    async fn fetch_minute(&self, window: MinuteWindow) -> Result<Vec<Reading>> {
        let (start, end) = match window {
            MinuteWindow::Since(start) => (start, None),
            MinuteWindow::Between(start, end) => (start, Some(end)),
        };

        let rows: Vec<ReadingRow> = sqlx::query_as(
            r#"
            SELECT id, at, voc_ccs, voc_tgs, pm25, pm10
            FROM air_minute
            WHERE at >= $1 AND ($2::TIMESTAMPTZ IS NULL OR at <= $2)
            ORDER BY id DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self)
        .await
        .context("failed to execute minute readings query")?;

        if rows.is_empty() {
            debug!(?window, "no readings in air_minute");
        }

        Ok(validate_rows(rows))
    }

    async fn latest_reading_at(&self) -> Result<Option<DateTime<Utc>>> {
        let at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT at FROM air ORDER BY id DESC LIMIT 1")
                .fetch_optional(self)
                .await
                .context("failed to execute latest reading query")?;

        Ok(at)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    pub air: u64,
    pub tgs: u64,
}

/// Which readings a purge deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeScope {
    /// Keep readings from the last N days.
    RetainDays(u32),
    All,
}

impl PurgeScope {
    /// Readings strictly older than the cutoff are deleted. `None` deletes everything.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match *self {
            PurgeScope::RetainDays(days) => Some(
                TimeDelta::try_days(days.into())
                    .and_then(|retain| now.checked_sub_signed(retain))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            PurgeScope::All => None,
        }
    }
}

/// Deletes readings outside `scope` from `air` and `tgs`.
pub async fn purge_readings(
    pool: &PgPool,
    scope: PurgeScope,
    now: DateTime<Utc>,
) -> Result<PurgeSummary> {
    let cutoff = scope.cutoff(now);
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let air = sqlx::query("DELETE FROM air WHERE $1::TIMESTAMPTZ IS NULL OR at < $1")
        .bind(cutoff)
        .execute(&mut *tx)
        .await
        .context("failed to purge air")?
        .rows_affected();

    let tgs = sqlx::query("DELETE FROM tgs WHERE $1::TIMESTAMPTZ IS NULL OR at < $1")
        .bind(cutoff)
        .execute(&mut *tx)
        .await
        .context("failed to purge tgs")?
        .rows_affected();

    tx.commit().await.context("failed to commit transaction")?;

    Ok(PurgeSummary { air, tgs })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn row(id: i64) -> ReadingRow {
        ReadingRow {
            id,
            at: Utc.with_ymd_and_hms(2020, 2, 3, 15, 0, 0).unwrap(),
            voc_ccs: Some(400.0),
            voc_tgs: Some(12.5),
            pm25: Some(8.0),
            pm10: Some(11.0),
        }
    }

    #[test]
    fn complete_row_converts() {
        let reading = Reading::try_from(row(7)).unwrap();

        assert_eq!(reading.id, 7);
        assert_eq!(reading.value(Metric::VocTgs), 12.5);
        assert_eq!(reading.value(Metric::Pm10), 11.0);
    }

    #[test]
    fn missing_metric_is_rejected() {
        let err = Reading::try_from(ReadingRow {
            pm25: None,
            ..row(3)
        })
        .unwrap_err();

        assert_eq!(
            err,
            ReadingError::MissingMetric {
                id: 3,
                metric: Metric::Pm25
            }
        );
    }

    #[test]
    fn validate_rows_keeps_order_and_drops_malformed() {
        let rows = vec![
            row(5),
            ReadingRow {
                voc_ccs: None,
                ..row(4)
            },
            row(3),
        ];

        let ids: Vec<_> = validate_rows(rows).iter().map(|r| r.id).collect();
        assert_eq!(ids, [5, 3]);
    }

    #[test]
    fn retain_days_cuts_off_n_days_back() {
        let now = Utc.with_ymd_and_hms(2020, 2, 13, 15, 0, 0).unwrap();

        assert_eq!(
            PurgeScope::RetainDays(10).cutoff(now),
            Some(Utc.with_ymd_and_hms(2020, 2, 3, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn retain_zero_days_cuts_off_now() {
        let now = Utc.with_ymd_and_hms(2020, 2, 13, 15, 0, 0).unwrap();

        assert_eq!(PurgeScope::RetainDays(0).cutoff(now), Some(now));
    }

    #[test]
    fn purge_all_has_no_cutoff() {
        assert_eq!(PurgeScope::All.cutoff(Utc::now()), None);
    }

    #[test]
    fn huge_retention_keeps_everything() {
        let now = Utc.with_ymd_and_hms(2020, 2, 13, 15, 0, 0).unwrap();

        assert_eq!(
            PurgeScope::RetainDays(u32::MAX).cutoff(now),
            Some(DateTime::<Utc>::MIN_UTC)
        );
    }
}
