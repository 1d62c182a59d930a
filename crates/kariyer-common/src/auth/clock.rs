//! Time source for issuance and expiry checks.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to, at whole-second resolution.
#[derive(Debug, Default)]
pub struct ManualClock {
    unix_secs: AtomicI64,
}

impl ManualClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            unix_secs: AtomicI64::new(instant.timestamp()),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.unix_secs.store(instant.timestamp(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.unix_secs.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.unix_secs.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_and_resets() {
        let start = DateTime::from_timestamp(1_000, 0).unwrap();
        let clock = ManualClock::at(start);
        clock.advance(Duration::minutes(16));
        assert_eq!(clock.now().timestamp(), 1_000 + 16 * 60);

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
