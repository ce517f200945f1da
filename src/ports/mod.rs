//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the grading core and an
//! external system (time, filesystem, process environment, shell, the
//! MQTT platform). Implementations live in `src/adapters/`.

pub mod clock;
pub mod env;
pub mod filesystem;
pub mod probe;
pub mod shell;

pub use clock::Clock;
pub use env::Environment;
pub use filesystem::FileSystem;
pub use probe::{ConnectionProbe, Credentials, ProbeStatus};
pub use shell::{ShellExecutor, ShellOutput};
