//! Domain models for mdefaults
//!
//! Contains the entry model and type rules without any I/O concerns.

mod entry;
mod value_type;

pub use entry::{ConfigEntry, EntryError};
pub use value_type::{UnknownValueType, ValueType, TYPE_MARKER};
