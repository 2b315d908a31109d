use crate::artifacts::browse::commit_graph::{CommitGraph, CommitNode};
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::browse::snapshot::{TreeNode, TreeSnapshotResolver};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;

/// Content hashes of a set of paths at one commit
pub struct PathHashTracker<'g, G: CommitGraph + ?Sized> {
    snapshots: TreeSnapshotResolver<'g, G>,
}

impl<'g, G: CommitGraph + ?Sized> PathHashTracker<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        PathHashTracker {
            snapshots: TreeSnapshotResolver::new(graph),
        }
    }

    /// Hash of every path that exists under `subtree` at `commit`
    ///
    /// Missing paths are left out. A missing subtree gives an empty map.
    /// Directories hash to their tree id; the empty path is the subtree itself.
    pub fn hashes(
        &self,
        commit: &CommitNode,
        subtree: &str,
        paths: &[String],
    ) -> Result<HashMap<String, ObjectId>, BrowseError> {
        match self.snapshots.subtree(commit, subtree)? {
            Some(root) => self.hashes_in(&root, paths),
            None => Ok(HashMap::new()),
        }
    }

    /// Same as [`Self::hashes`], for an already loaded subtree
    pub fn hashes_in(
        &self,
        root: &TreeNode,
        paths: &[String],
    ) -> Result<HashMap<String, ObjectId>, BrowseError> {
        let mut hashes = HashMap::with_capacity(paths.len());

        for path in paths {
            if let Some(entry) = self.snapshots.find_entry(root, path)? {
                hashes.insert(path.clone(), entry.oid);
            }
        }

        Ok(hashes)
    }

    pub fn snapshots(&self) -> &TreeSnapshotResolver<'g, G> {
        &self.snapshots
    }
}
