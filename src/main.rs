//! mdefaults - sync macOS defaults with a plain-text file

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = mdefaults::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
