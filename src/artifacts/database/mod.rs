//! Database entry types
//!
//! Types used when reading tree objects from the database: named entries and
//! the modes that say what each entry points at.

pub mod database_entry;
pub mod entry_mode;
