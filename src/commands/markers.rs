//! `pubcheck markers` — list the marker files currently present.
//!
//! Markers are write-only for the validator; this is the one read path,
//! purely for auditing what a run produced before committing it.

use std::io::Write;
use std::path::Path;

use crate::context::ServiceContext;
use crate::markers::MarkerStore;
use crate::report::Reporter;

/// Executes the `markers` command against the repository at `repo`.
///
/// # Errors
///
/// Returns an error string if the marker directory cannot be read.
pub fn run_with_context<W: Write>(
    ctx: &ServiceContext,
    reporter: &mut Reporter<W>,
    repo: &Path,
) -> Result<bool, String> {
    let store = MarkerStore::new(ctx, repo);
    let names = store.list()?;

    if names.is_empty() {
        reporter.info(&format!("No markers found under {}", store.dir().display()));
        return Ok(true);
    }

    for name in &names {
        let stem = name.strip_suffix(".txt").unwrap_or(name);
        match store.read(stem) {
            Ok(contents) => {
                let verified = contents.lines().next().unwrap_or("");
                reporter.success(&format!("{stem} — {verified}"));
            }
            Err(_) => reporter.warn(&format!("{name} — unreadable")),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::{
        FixedClock, FixedEnvironment, FixedShellExecutor, InMemoryFileSystem, ScriptedProbe,
    };
    use crate::markers;
    use crate::ports::probe::ProbeStatus;

    fn ctx_with_fs(fs: InMemoryFileSystem) -> ServiceContext {
        ServiceContext {
            clock: Box::new(FixedClock::starting_at("2024-06-15T10:30:00Z".parse().unwrap())),
            fs: Box::new(fs),
            env: Box::new(FixedEnvironment::empty()),
            shell: Box::new(FixedShellExecutor::succeeding_on(&[])),
            probe: Box::new(ScriptedProbe::new(vec![ProbeStatus::Pending])),
        }
    }

    #[test]
    fn empty_directory_reports_no_markers() {
        let ctx = ctx_with_fs(InMemoryFileSystem::new());
        let mut reporter = Reporter::new(Vec::new(), false);

        assert!(run_with_context(&ctx, &mut reporter, Path::new("/repo")).unwrap());
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("No markers found"));
    }

    #[test]
    fn lists_each_marker_with_its_verified_line() {
        let ctx = ctx_with_fs(InMemoryFileSystem::new());
        let store = MarkerStore::new(&ctx, Path::new("/repo"));
        store.create(markers::SCRIPT_VERIFIED, "Script structure valid").unwrap();

        let mut reporter = Reporter::new(Vec::new(), false);
        run_with_context(&ctx, &mut reporter, Path::new("/repo")).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(out.contains("mqtt_script_verified — Verified: 2024-06-15T10:30:00+00:00"));
    }
}
