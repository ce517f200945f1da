//! Scripted connectivity probe.

use std::sync::Mutex;

use crate::ports::probe::{ConnectionProbe, Credentials, ProbeStatus};

/// Probe that replays a fixed sequence of statuses.
///
/// Once the script is exhausted, every further poll repeats the final
/// status, so "never connects" is just a script of `[Pending]`.
pub struct ScriptedProbe {
    script: Mutex<Vec<ProbeStatus>>,
    polls: Mutex<usize>,
}

impl ScriptedProbe {
    /// Creates a probe that replays `script` in order.
    ///
    /// # Panics
    ///
    /// Panics if the script is empty.
    #[must_use]
    pub fn new(script: Vec<ProbeStatus>) -> Self {
        assert!(!script.is_empty(), "ScriptedProbe needs at least one status");
        Self { script: Mutex::new(script), polls: Mutex::new(0) }
    }

    /// Number of times `poll` has been called.
    #[must_use]
    pub fn poll_count(&self) -> usize {
        *self.polls.lock().expect("probe mutex poisoned")
    }
}

impl ConnectionProbe for ScriptedProbe {
    fn poll(
        &self,
        _credentials: &Credentials,
    ) -> Result<ProbeStatus, Box<dyn std::error::Error + Send + Sync>> {
        let mut polls = self.polls.lock().expect("probe mutex poisoned");
        let script = self.script.lock().expect("probe mutex poisoned");
        let status = script.get(*polls).unwrap_or_else(|| {
            script.last().expect("script verified non-empty in constructor")
        });
        *polls += 1;
        Ok(status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials { username: "ada".into(), key: "k".into() }
    }

    #[test]
    fn replays_script_then_repeats_last() {
        let probe = ScriptedProbe::new(vec![ProbeStatus::Pending, ProbeStatus::Connected]);

        assert_eq!(probe.poll(&creds()).unwrap(), ProbeStatus::Pending);
        assert_eq!(probe.poll(&creds()).unwrap(), ProbeStatus::Connected);
        assert_eq!(probe.poll(&creds()).unwrap(), ProbeStatus::Connected);
        assert_eq!(probe.poll_count(), 3);
    }
}
