//! Time Abstraction
//!
//! Provides an injectable time source so token staleness and relative-date
//! rendering can be tested deterministically.

use chrono::{DateTime, Utc};

/// Time source trait
///
/// # Example
///
/// ```ignore
/// use bridge_traits::time::Clock;
///
/// fn log_timestamp(clock: &dyn Clock) {
///     let now = clock.now();
///     println!("Current time: {}", now);
/// }
/// ```
pub trait Clock: Send + Sync {
    /// Get current UTC time
    fn now(&self) -> DateTime<Utc>;

    /// Get current Unix timestamp in seconds
    fn unix_timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// System clock implementation using actual system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
