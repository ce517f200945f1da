//! Fixed environment adapter with preset variables.

use std::collections::HashMap;

use crate::ports::env::Environment;

/// Environment adapter that answers from a preset map.
#[derive(Default)]
pub struct FixedEnvironment {
    vars: HashMap<String, String>,
}

impl FixedEnvironment {
    /// Creates an environment with no variables set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an environment from name/value pairs.
    #[must_use]
    pub fn with_vars(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
        }
    }
}

impl Environment for FixedEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
