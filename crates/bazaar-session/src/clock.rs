//! Wall-clock source for expiry decisions.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use bazaar_record::EpochMillis;
use chrono::Utc;

/// Tells the session manager what time it is.
///
/// Expiry is an absolute wall-clock instant persisted across restarts, so
/// this is epoch time, not a monotonic `Instant`.
pub trait Clock: Send + Sync + 'static {
    /// The current instant.
    fn now(&self) -> EpochMillis;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        EpochMillis(Utc::now().timestamp_millis())
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the manager.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: EpochMillis) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start.0)),
        }
    }

    /// Jumps to `instant`.
    pub fn set(&self, instant: EpochMillis) {
        self.now.store(instant.0, Ordering::SeqCst);
    }

    /// Moves forward by `by`.
    pub fn advance(&self, by: Duration) {
        let millis = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> EpochMillis {
        EpochMillis(self.now.load(Ordering::SeqCst))
    }
}

/// Lets several managers share one clock, e.g. across a reload.
impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> EpochMillis {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > EpochMillis(1_577_836_800_000));
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(EpochMillis(1_000));
        let shared = clock.clone();

        clock.advance(Duration::from_millis(250));
        assert_eq!(shared.now(), EpochMillis(1_250));

        shared.set(EpochMillis(7));
        assert_eq!(clock.now(), EpochMillis(7));
    }

    #[test]
    fn test_arc_dyn_clock_delegates() {
        let manual = ManualClock::new(EpochMillis(42));
        let shared: Arc<dyn Clock> = Arc::new(manual.clone());

        manual.advance(Duration::from_millis(8));

        assert_eq!(shared.now(), EpochMillis(50));
    }
}
