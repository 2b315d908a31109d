//! In-memory commit graph for unit tests

use crate::artifacts::browse::commit_graph::CommitGraph;
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::database::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use chrono::DateTime;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Default)]
pub struct MemoryGraph {
    commits: HashMap<ObjectId, Commit>,
    trees: HashMap<ObjectId, Tree>,
    corrupt: HashSet<ObjectId>,
}

impl MemoryGraph {
    pub fn add_tree(&mut self, tree: Tree) -> ObjectId {
        let oid = tree.object_id().unwrap();
        self.trees.insert(oid.clone(), tree);
        oid
    }

    /// Build nested trees from `(path, content)` pairs
    pub fn snapshot(&mut self, files: &[(&str, &str)]) -> ObjectId {
        let mut entries = Vec::new();
        let mut dirs: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();

        for &(path, content) in files {
            match path.split_once('/') {
                Some((dir, rest)) => dirs.entry(dir).or_default().push((rest, content)),
                None => entries.push(DatabaseEntry::new(
                    path.to_string(),
                    Blob::from(content).object_id().unwrap(),
                    EntryMode::File(FileMode::Regular),
                )),
            }
        }

        for (dir, files) in dirs {
            let oid = self.snapshot(&files);
            entries.push(DatabaseEntry::new(dir.to_string(), oid, EntryMode::Directory));
        }

        self.add_tree(Tree::build(entries))
    }

    pub fn add_commit(
        &mut self,
        parents: &[&ObjectId],
        time: i64,
        files: &[(&str, &str)],
    ) -> ObjectId {
        let tree_oid = self.snapshot(files);
        self.add_commit_tree(parents, time, tree_oid)
    }

    pub fn add_commit_tree(&mut self, parents: &[&ObjectId], time: i64, tree_oid: ObjectId) -> ObjectId {
        let timestamp = DateTime::from_timestamp(time, 0).unwrap().fixed_offset();
        let author = Author::new("Tester".to_string(), "t@example.com".to_string(), timestamp);
        let commit = Commit::new(
            parents.iter().map(|&parent| parent.clone()).collect(),
            tree_oid,
            author,
            format!("commit at {time}\n"),
        );

        let oid = commit.object_id().unwrap();
        self.commits.insert(oid.clone(), commit);
        oid
    }

    /// Make an object unreadable, as if the store lost it
    pub fn forget(&mut self, oid: &ObjectId) {
        self.commits.remove(oid);
        self.trees.remove(oid);
    }

    /// Make an object undecodable
    pub fn corrupt(&mut self, oid: &ObjectId) {
        self.corrupt.insert(oid.clone());
    }

    fn check(&self, oid: &ObjectId) -> Result<(), BrowseError> {
        if self.corrupt.contains(oid) {
            return Err(BrowseError::malformed(oid, "corrupt test object"));
        }
        Ok(())
    }

    fn missing(oid: &ObjectId) -> BrowseError {
        BrowseError::StoreUnavailable {
            oid: oid.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such object"),
        }
    }
}

impl CommitGraph for MemoryGraph {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, BrowseError> {
        self.check(oid)?;
        self.commits
            .get(oid)
            .cloned()
            .ok_or_else(|| Self::missing(oid))
    }

    fn tree(&self, oid: &ObjectId) -> Result<Tree, BrowseError> {
        self.check(oid)?;
        self.trees.get(oid).cloned().ok_or_else(|| Self::missing(oid))
    }
}
