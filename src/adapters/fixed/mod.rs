//! Deterministic in-memory adapters.
//!
//! These implement the same ports as the live adapters but never touch
//! disk, network, clock, or the process environment. Unit and
//! integration tests wire them into a `ServiceContext` to exercise the
//! checks, the marker store, and the probe loop in isolation.

pub mod clock;
pub mod env;
pub mod filesystem;
pub mod probe;
pub mod shell;

pub use clock::FixedClock;
pub use env::FixedEnvironment;
pub use filesystem::InMemoryFileSystem;
pub use probe::ScriptedProbe;
pub use shell::FixedShellExecutor;
