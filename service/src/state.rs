//! Shared application state: the governance engine behind a single lock,
//! plus the clock adapter that stamps every state-changing call.
//!
//! The engine requires serialized calls; one mutex around the whole value
//! is exactly that boundary. Handlers take the lock, run one operation to
//! completion, and release — no await points while holding it.

use std::sync::{Arc, Mutex, PoisonError};

use cap_engine::{Capitol, Principal, Timestamp};

/// Source of logical time for governance operations.
///
/// The engine never reads a clock itself; the service stamps each call.
/// The trait keeps production on wall-clock seconds while tests drive
/// time by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Pre-1970 system clocks collapse to t = 0 rather than panic.
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Shared handle passed to every handler.
#[derive(Clone)]
pub struct AppState {
    capitol: Arc<Mutex<Capitol>>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Fresh governance state with the given administrator and clock.
    pub fn new(admin: Principal, clock: Arc<dyn Clock>) -> Self {
        Self {
            capitol: Arc::new(Mutex::new(Capitol::new(admin))),
            clock,
        }
    }

    /// Fresh governance state on the system clock.
    #[must_use]
    pub fn with_system_clock(admin: Principal) -> Self {
        Self::new(admin, Arc::new(SystemClock))
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Run one operation with exclusive access to the governance state.
    ///
    /// A poisoned lock is recovered rather than propagated: the engine
    /// never leaves partial writes behind, so the state is sound even if
    /// a previous holder panicked.
    pub fn with_capitol<T>(&self, f: impl FnOnce(&mut Capitol) -> T) -> T {
        let mut guard = self
            .capitol
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Manual clock for tests.

    use std::sync::atomic::{AtomicU64, Ordering};

    use super::{Clock, Timestamp};

    /// Test clock that only moves when told to.
    #[derive(Debug, Default)]
    pub struct ManualClock(AtomicU64);

    impl ManualClock {
        #[must_use]
        pub fn new(start: Timestamp) -> Self {
            Self(AtomicU64::new(start))
        }

        /// Jump to an absolute time.
        pub fn set(&self, now: Timestamp) {
            self.0.store(now, Ordering::SeqCst);
        }

        /// Move forward by a delta.
        pub fn advance(&self, delta: u64) {
            self.0.fetch_add(delta, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            self.0.load(Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::ManualClock;
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.advance(50);
        assert_eq!(clock.now(), 150);
        clock.set(7);
        assert_eq!(clock.now(), 7);
    }

    #[test]
    fn state_hands_out_exclusive_access() {
        let state = AppState::new(Principal::new("admin"), Arc::new(ManualClock::new(0)));
        let admin = state.with_capitol(|capitol| capitol.admin().clone());
        assert_eq!(admin, Principal::new("admin"));
    }
}
