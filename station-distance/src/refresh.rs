//! Staleness policy for remote catalog data.

use std::time::Duration;

/// One day in milliseconds.
pub const ONE_DAY_MS: i64 = 86_400_000;

/// Returns true when more than `interval_ms` has passed since `last_ms`.
///
/// The caller supplies `now_ms`; nothing here reads the clock.
pub fn should_refresh(last_ms: i64, now_ms: i64, interval_ms: i64) -> bool {
    now_ms.saturating_sub(last_ms) > interval_ms
}

/// How often remote catalog data is considered stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    interval_ms: i64,
}

impl RefreshPolicy {
    /// Create a policy with the given refresh interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: i64::try_from(interval.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// Returns the refresh interval in milliseconds.
    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    /// Returns the refresh interval as a Duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(0) as u64)
    }

    /// Check whether data last synced at `last_ms` is stale at `now_ms`.
    pub fn is_stale(&self, last_ms: i64, now_ms: i64) -> bool {
        should_refresh(last_ms, now_ms, self.interval_ms)
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            interval_ms: ONE_DAY_MS,
        }
    }
}
