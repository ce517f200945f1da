//! Service context bundling all port trait objects.

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::env::LiveEnvironment;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::probe::LiveConnectionProbe;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::ports::clock::Clock;
use crate::ports::env::Environment;
use crate::ports::filesystem::FileSystem;
use crate::ports::probe::ConnectionProbe;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Commands take a
/// context rather than reaching for globals, so tests can substitute the
/// `fixed` adapters field by field.
pub struct ServiceContext {
    /// Clock for timestamps and the probe poll interval.
    pub clock: Box<dyn Clock>,
    /// Filesystem for reading the graded script and writing markers.
    pub fs: Box<dyn FileSystem>,
    /// Process environment for credential variables.
    pub env: Box<dyn Environment>,
    /// Shell executor for the on-device dependency probe.
    pub shell: Box<dyn ShellExecutor>,
    /// Connectivity probe for the optional live handshake.
    pub probe: Box<dyn ConnectionProbe>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client behind the connectivity probe
    /// cannot be constructed.
    pub fn live() -> Result<Self, String> {
        let probe = LiveConnectionProbe::new()
            .map_err(|e| format!("Failed to initialize connectivity probe: {e}"))?;
        Ok(Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            env: Box::new(LiveEnvironment),
            shell: Box::new(LiveShellExecutor),
            probe: Box::new(probe),
        })
    }
}
