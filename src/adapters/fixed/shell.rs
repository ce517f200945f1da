//! Fixed probe runner with scripted command outputs.

use std::collections::HashMap;

use crate::ports::shell::{ShellExecutor, ShellOutput};

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ")
}

/// Probe runner that answers from a table of scripted outputs, keyed
/// by the rendered command line (`program` and argv joined by spaces).
///
/// Commands without an entry return exit code 127, mirroring a missing
/// program.
pub struct FixedShellExecutor {
    outputs: HashMap<String, ShellOutput>,
}

impl FixedShellExecutor {
    /// Creates an executor where the listed command lines succeed with
    /// exit 0.
    #[must_use]
    pub fn succeeding_on(commands: &[&str]) -> Self {
        let outputs = commands
            .iter()
            .map(|cmd| {
                (
                    (*cmd).to_string(),
                    ShellOutput { exit_code: 0, stdout: String::new(), stderr: String::new() },
                )
            })
            .collect();
        Self { outputs }
    }

    /// Creates an executor where the listed command lines fail with the
    /// given exit code and stderr.
    #[must_use]
    pub fn failing_on(commands: &[&str], exit_code: i32, stderr: &str) -> Self {
        let outputs = commands
            .iter()
            .map(|cmd| {
                (
                    (*cmd).to_string(),
                    ShellOutput { exit_code, stdout: String::new(), stderr: stderr.to_string() },
                )
            })
            .collect();
        Self { outputs }
    }
}

impl ShellExecutor for FixedShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[&str],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let line = render(program, args);
        Ok(self.outputs.get(&line).cloned().unwrap_or(ShellOutput {
            exit_code: 127,
            stdout: String::new(),
            stderr: format!("{program}: command not found"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_command_line_succeeds() {
        let shell = FixedShellExecutor::succeeding_on(&["python3 -c import Adafruit_IO"]);
        let out = shell.run("python3", &["-c", "import Adafruit_IO"]).unwrap();
        assert_eq!(out.exit_code, 0);
    }

    #[test]
    fn unscripted_command_is_not_found() {
        let shell = FixedShellExecutor::succeeding_on(&[]);
        let out = shell.run("frobnicate", &[]).unwrap();
        assert_eq!(out.exit_code, 127);
    }
}
