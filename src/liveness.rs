use anyhow::{Context as _, Result};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::db::ReadingStore;

/// Whether a reading taken at `at` is still fresh at `now`. The window is inclusive.
pub fn is_fresh(at: DateTime<Utc>, now: DateTime<Utc>, window: TimeDelta) -> bool {
    now - at <= window
}

/// The sensor is online iff the newest stored reading is within `window` of `now`.
///
/// An empty store is offline. Store failures are returned, not mapped to offline.
pub async fn is_online<S: ReadingStore>(
    store: &S,
    now: DateTime<Utc>,
    window: TimeDelta,
) -> Result<bool> {
    let Some(at) = store
        .latest_reading_at()
        .await
        .context("failed to get latest reading")?
    else {
        debug!("no readings, reporting offline");
        return Ok(false);
    };

    Ok(is_fresh(at, now, window))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 2, 3, 15, 0, 0).unwrap()
    }

    #[test]
    fn exactly_five_minutes_is_fresh() {
        assert!(is_fresh(
            now() - TimeDelta::minutes(5),
            now(),
            TimeDelta::minutes(5)
        ));
    }

    #[test]
    fn four_fifty_nine_is_fresh() {
        assert!(is_fresh(
            now() - TimeDelta::seconds(4 * 60 + 59),
            now(),
            TimeDelta::minutes(5)
        ));
    }

    #[test]
    fn five_oh_one_is_stale() {
        assert!(!is_fresh(
            now() - TimeDelta::seconds(5 * 60 + 1),
            now(),
            TimeDelta::minutes(5)
        ));
    }

    #[test]
    fn future_reading_is_fresh() {
        assert!(is_fresh(
            now() + TimeDelta::seconds(30),
            now(),
            TimeDelta::minutes(5)
        ));
    }
}
