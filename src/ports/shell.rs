//! Shell executor port for the on-device dependency probe.

/// The captured result of a probe process.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error, where an interpreter reports its
    /// import failure.
    pub stderr: String,
}

/// Runs external probe commands.
///
/// Commands are given as a program plus argv, never a shell string:
/// the dependency probe has nothing to interpolate, and keeping the
/// shell out of the path keeps its quoting rules out too.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` and captures its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned (e.g. no such
    /// interpreter on this device).
    fn run(
        &self,
        program: &str,
        args: &[&str],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}
