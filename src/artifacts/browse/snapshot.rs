//! Directory snapshots of a commit
//!
//! Paths use `/` as separator; empty components (leading, trailing or
//! doubled slashes) are ignored, so `""` and `"/"` both name the root tree.

use crate::artifacts::browse::commit_graph::{CommitGraph, CommitNode};
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::database::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;

/// A loaded tree together with its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    oid: ObjectId,
    tree: Tree,
}

impl TreeNode {
    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn entries(&self) -> impl Iterator<Item = &DatabaseEntry> {
        self.tree.entries()
    }

    pub fn get(&self, name: &str) -> Option<&DatabaseEntry> {
        self.tree.get(name)
    }
}

/// Outcome of stepping into one entry of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descent {
    Tree(TreeNode),
    /// Blob, symlink or submodule
    Leaf(DatabaseEntry),
    NotFound,
}

pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|component| !component.is_empty())
}

pub struct TreeSnapshotResolver<'g, G: CommitGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: CommitGraph + ?Sized> TreeSnapshotResolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        TreeSnapshotResolver { graph }
    }

    pub fn load(&self, oid: &ObjectId) -> Result<TreeNode, BrowseError> {
        Ok(TreeNode {
            oid: oid.clone(),
            tree: self.graph.tree(oid)?,
        })
    }

    /// The tree at `path` under the commit's root, or None when the path is
    /// missing or names something other than a directory
    pub fn subtree(
        &self,
        commit: &CommitNode,
        path: &str,
    ) -> Result<Option<TreeNode>, BrowseError> {
        let mut node = self.load(&commit.tree_oid)?;

        for component in components(path) {
            match self.descend(&node, component)? {
                Descent::Tree(child) => node = child,
                Descent::Leaf(_) | Descent::NotFound => return Ok(None),
            }
        }

        Ok(Some(node))
    }

    pub fn descend(&self, tree: &TreeNode, name: &str) -> Result<Descent, BrowseError> {
        match tree.get(name) {
            None => Ok(Descent::NotFound),
            Some(entry) if entry.is_tree() => Ok(Descent::Tree(self.load(&entry.oid)?)),
            Some(entry) => Ok(Descent::Leaf(entry.clone())),
        }
    }

    /// The entry at a path relative to `tree`
    ///
    /// The empty path yields the tree itself as a directory entry with an
    /// empty name. Only the directories leading to the entry are loaded.
    pub fn find_entry(
        &self,
        tree: &TreeNode,
        relative_path: &str,
    ) -> Result<Option<DatabaseEntry>, BrowseError> {
        let components = components(relative_path).collect::<Vec<_>>();
        let Some((last, dirs)) = components.split_last() else {
            return Ok(Some(DatabaseEntry::new(
                String::new(),
                tree.oid.clone(),
                EntryMode::Directory,
            )));
        };

        let mut current: Option<TreeNode> = None;
        for dir in dirs {
            let parent = current.as_ref().unwrap_or(tree);
            match self.descend(parent, dir)? {
                Descent::Tree(child) => current = Some(child),
                Descent::Leaf(_) | Descent::NotFound => return Ok(None),
            }
        }

        Ok(current.as_ref().unwrap_or(tree).get(last).cloned())
    }

    /// Entries of the subtree at `path`, in tree order
    pub fn entries(
        &self,
        commit: &CommitNode,
        path: &str,
    ) -> Result<Option<Vec<DatabaseEntry>>, BrowseError> {
        Ok(self
            .subtree(commit, path)?
            .map(|node| node.entries().cloned().collect()))
    }
}
