//! Commit history traversal
//!
//! - `rev_list`: every ancestor of a commit, newest committer time first
//!
//! The walk keeps a priority queue of `(timestamp, oid)` so merged branches
//! interleave by time and each commit is produced once.

pub mod rev_list;
