//! Live adapters for real external interactions.

pub mod clock;
pub mod env;
pub mod filesystem;
pub mod probe;
pub mod shell;
