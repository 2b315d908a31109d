//! Git data structures and algorithms
//!
//! - `branch`: ref names and revision expressions
//! - `browse`: last-modified attribution for directory listings
//! - `core`: shared output utilities (pager wrapper)
//! - `database`: tree entry types
//! - `log`: commit history traversal
//! - `objects`: git object types (blob, tree, commit, tag)

pub mod branch;
pub mod browse;
pub mod core;
pub mod database;
pub mod log;
pub mod objects;
