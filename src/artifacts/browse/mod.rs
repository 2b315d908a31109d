//! Last-modified annotations for directory listings
//!
//! - `commit_graph`: read-only commit and tree access ([`CommitGraph`])
//! - `snapshot`: subtrees and entries of a commit
//! - `path_hashes`: content hashes of paths at a commit
//! - `last_modified`: the time-ordered multi-path history walk
//!
//! [`CommitGraph`]: commit_graph::CommitGraph

pub mod commit_graph;
pub mod error;
pub mod last_modified;
pub mod path_hashes;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod memory_graph;

use crate::artifacts::browse::commit_graph::CommitGraph;
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::browse::last_modified::{LastCommit, LastModifiedResolver};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Last-modifying commit of each path under `subtree` at `start`
///
/// Paths absent at `start` are missing from the result.
pub fn resolve_last_modified<G: CommitGraph + ?Sized>(
    graph: &G,
    start: &ObjectId,
    subtree: &str,
    paths: &[String],
) -> Result<BTreeMap<String, LastCommit>, BrowseError> {
    LastModifiedResolver::new(graph).resolve_last_modified(start, subtree, paths)
}
