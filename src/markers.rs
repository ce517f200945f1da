//! Marker store — the filesystem contract between the local validator
//! and the hosted grader.
//!
//! One file per marker under `.test_markers/`, named `<marker>.txt`,
//! containing a `Verified:` timestamp line and a free-text status line.
//! Markers are written by `pubcheck validate` and committed by the
//! student as an audit artifact. The hosted side re-derives its own
//! checks from the script text and does not read markers back, so a
//! hand-authored marker is not detected; the markers are advisory, not
//! a verified trust boundary.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;

/// Directory holding marker files, relative to the target repository.
pub const MARKERS_DIR: &str = ".test_markers";

/// Marker written when the client library imports on-device.
pub const DEPENDENCY_VERIFIED: &str = "adafruit_io_verified";
/// Marker written when the script passes structural validation.
pub const SCRIPT_VERIFIED: &str = "mqtt_script_verified";
/// Marker written when the live handshake is acknowledged.
pub const CONNECTION_VERIFIED: &str = "mqtt_connection_verified";
/// Marker written when every required stage passed.
pub const ALL_PASSED: &str = "all_tests_passed";

/// Writes and lists marker files.
///
/// All I/O goes through `ctx.fs` and timestamps come from `ctx.clock`,
/// so the store works unchanged against the in-memory adapters.
pub struct MarkerStore<'a> {
    ctx: &'a ServiceContext,
    dir: PathBuf,
}

impl<'a> MarkerStore<'a> {
    /// Creates a store for the repository rooted at `repo`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, repo: &Path) -> Self {
        Self { ctx, dir: repo.join(MARKERS_DIR) }
    }

    /// The directory markers are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates (or overwrites) the named marker with a timestamp and a
    /// status line.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker file cannot be written.
    pub fn create(&self, name: &str, status: &str) -> Result<(), String> {
        let path = self.dir.join(format!("{name}.txt"));
        let timestamp = self.ctx.clock.now().to_rfc3339();
        let contents = format!("Verified: {timestamp}\n{status}\n");
        self.ctx
            .fs
            .write(&path, &contents)
            .map_err(|e| format!("Failed to write marker {name}: {e}"))
    }

    /// Lists the marker file names currently present, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<String>, String> {
        if !self.ctx.fs.exists(&self.dir) {
            return Ok(Vec::new());
        }
        self.ctx
            .fs
            .list_dir(&self.dir)
            .map_err(|e| format!("Failed to list {}: {e}", self.dir.display()))
    }

    /// Reads the named marker's raw contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker does not exist or cannot be read.
    pub fn read(&self, name: &str) -> Result<String, String> {
        let path = self.dir.join(format!("{name}.txt"));
        self.ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read marker {name}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::{
        FixedClock, FixedEnvironment, FixedShellExecutor, InMemoryFileSystem, ScriptedProbe,
    };
    use crate::ports::probe::ProbeStatus;

    fn fixed_ctx() -> ServiceContext {
        ServiceContext {
            clock: Box::new(FixedClock::starting_at("2024-06-15T10:30:00Z".parse().unwrap())),
            fs: Box::new(InMemoryFileSystem::new()),
            env: Box::new(FixedEnvironment::empty()),
            shell: Box::new(FixedShellExecutor::succeeding_on(&[])),
            probe: Box::new(ScriptedProbe::new(vec![ProbeStatus::Pending])),
        }
    }

    #[test]
    fn marker_has_timestamp_line_then_status_line() {
        let ctx = fixed_ctx();
        let store = MarkerStore::new(&ctx, Path::new("/repo"));

        store.create(SCRIPT_VERIFIED, "Script structure valid").unwrap();

        let contents = store.read(SCRIPT_VERIFIED).unwrap();
        assert_eq!(contents, "Verified: 2024-06-15T10:30:00+00:00\nScript structure valid\n");
    }

    #[test]
    fn rerunning_overwrites_the_marker() {
        let ctx = fixed_ctx();
        let store = MarkerStore::new(&ctx, Path::new("/repo"));

        store.create(ALL_PASSED, "first run").unwrap();
        store.create(ALL_PASSED, "second run").unwrap();

        assert!(store.read(ALL_PASSED).unwrap().ends_with("second run\n"));
        assert_eq!(store.list().unwrap(), vec!["all_tests_passed.txt"]);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let ctx = fixed_ctx();
        let store = MarkerStore::new(&ctx, Path::new("/repo"));
        assert!(store.list().unwrap().is_empty());
    }
}
