//! Clock port for obtaining the current time and sleeping.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Provides the current time and bounded sleeps.
///
/// Abstracting time access lets the connection-probe poll loop run
/// deterministically in tests by substituting a stepping clock.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Blocks the current thread for the given duration.
    fn sleep(&self, duration: Duration);
}
