use std::sync::Mutex;

use chrono::Duration;
use harbor_core::Timestamp;
use harbor_ports::Clock;

/// Manually controlled clock for deterministic tests
///
/// Time is frozen at whatever instant it was last set to and only
/// moves when told to. Oracle staleness behavior is tested by
/// advancing this clock past a reading's `updated_at`.
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to an absolute instant (may move backwards)
    pub fn set(&self, to: Timestamp) {
        *self.now.lock().expect("clock state poisoned") = to;
    }

    /// Move forward by the given duration
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock state poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("clock state poisoned")
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
