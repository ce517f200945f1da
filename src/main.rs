//! Binary entrypoint for the `pubcheck` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match pubcheck::run(std::env::args()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
