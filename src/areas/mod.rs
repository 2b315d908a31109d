//! Repository storage areas
//!
//! - `database`: loose object store (blobs, trees, commits, tags)
//! - `refs`: reference management (HEAD, branches, tags, packed-refs)
//! - `repository`: ties the areas together and owns the output writer

pub mod database;
pub mod refs;
pub mod repository;
