//! Bounded wait for the optional connectivity handshake.
//!
//! A synchronous poll loop over the probe port: fixed timeout, fixed
//! interval, clock-measured. The loop never blocks past the timeout if
//! the platform never acknowledges.

use std::time::Duration;

use crate::context::ServiceContext;
use crate::ports::probe::{Credentials, ProbeStatus};

/// Total time budget for the handshake.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause between probe attempts.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Terminal outcome of the bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The platform acknowledged the handshake within the budget.
    Connected,
    /// No acknowledgement before the timeout elapsed.
    TimedOut,
    /// The platform rejected the credentials; retrying cannot help.
    Unauthorized,
}

/// Polls the probe until it connects, the credentials are rejected, or
/// the timeout elapses.
///
/// # Errors
///
/// Propagates probe errors other than "not yet connected".
pub fn wait_for_connection(
    ctx: &ServiceContext,
    credentials: &Credentials,
) -> Result<ConnectionOutcome, Box<dyn std::error::Error + Send + Sync>> {
    let budget =
        chrono::Duration::from_std(CONNECT_TIMEOUT).unwrap_or_else(|_| chrono::Duration::zero());
    let deadline = ctx.clock.now() + budget;

    loop {
        match ctx.probe.poll(credentials)? {
            ProbeStatus::Connected => return Ok(ConnectionOutcome::Connected),
            ProbeStatus::Unauthorized => return Ok(ConnectionOutcome::Unauthorized),
            ProbeStatus::Pending => {}
        }
        if ctx.clock.now() >= deadline {
            return Ok(ConnectionOutcome::TimedOut);
        }
        ctx.clock.sleep(POLL_INTERVAL);
    }
}
