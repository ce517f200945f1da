//! Environment port for reading credential variables.

/// Provides read access to process environment variables.
///
/// Only the optional connectivity stage consults the environment; the
/// static checks never do. Abstracting it keeps validator tests free of
/// `std::env` mutation.
pub trait Environment: Send + Sync {
    /// Returns the value of the named variable, or `None` if unset or
    /// not valid UTF-8.
    fn var(&self, name: &str) -> Option<String>;
}
