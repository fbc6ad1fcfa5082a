//! mdefaults - keep macOS defaults in a plain-text file
//!
//! Settings are tracked in `~/.mdefaults` as `DOMAIN KEY [[-TYPE] VALUE]`
//! lines. `pull` refreshes the file from the system preference store and
//! `push` writes the file back into it.

pub mod domain;
pub mod storage;
pub mod backend;
pub mod sync;
pub mod cli;

pub use domain::{ConfigEntry, ValueType};
