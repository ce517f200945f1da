//! Live environment adapter using `std::env`.

use crate::ports::env::Environment;

/// Live environment adapter reading real process variables.
pub struct LiveEnvironment;

impl Environment for LiveEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
