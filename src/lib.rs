//! Read-only browsing of git repositories
//!
//! - `areas`: the on-disk pieces of a repository (object database, refs)
//! - `artifacts`: git objects, revisions and the history walks built on them
//! - `commands`: user facing views
//! - `logging`: diagnostics setup for the binary

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod logging;
