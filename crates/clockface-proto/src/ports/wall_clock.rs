use std::fmt::Debug;

use chrono::{DateTime, Local};

/// Read-only access to the system wall clock.
///
/// Implementations must be cheap to call: the clock face reads the time once
/// per tick on the rendering thread.
pub trait WallClock: Debug + Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;

    /// Milliseconds elapsed since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}
