//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `pull` | Read system values into `~/.mdefaults` (asks before overwriting) |
//! | `push` | Write `~/.mdefaults` values into the system |
//! | `debug` | Show resolved settings |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Logs go to stderr. `--verbose` enables debug logs; `RUST_LOG` overrides
//! both.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod pull_cmd;
mod push_cmd;

pub use app::{run, Cli, Commands, RunOptions};
pub use output::{Output, OutputFormat};
