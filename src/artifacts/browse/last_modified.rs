//! Last-modifying commit for many paths at once
//!
//! A single walk over the commit graph replaces one history walk per path.
//! Frontier entries wait in a max-heap ordered by committer time (ties
//! broken by the greater object id), so the walk moves through history in
//! one global time-descending order. When a commit is popped, each of its
//! unresolved paths is compared against the commit's parents:
//!
//! - if some parent holds the same content hash, the path is handed to the
//!   first such parent and the search continues there;
//! - otherwise the popped commit is where the path last changed.
//!
//! A root commit resolves everything that reaches it. Each path lives in at
//! most one frontier entry at a time, so no path is resolved twice.

use crate::artifacts::browse::commit_graph::{CommitGraph, CommitNode};
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::browse::path_hashes::PathHashTracker;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

/// The commit that last modified a path, as shown next to a listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastCommit {
    pub oid: ObjectId,
    pub author_name: String,
    pub committed_at: DateTime<Utc>,
    pub message: String,
}

impl LastCommit {
    pub fn from_commit(oid: ObjectId, commit: &Commit) -> Self {
        LastCommit {
            oid,
            author_name: commit.author().name().to_string(),
            committed_at: commit.committed_at_utc(),
            message: commit.message().to_string(),
        }
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

struct FrontierEntry {
    commit: CommitNode,
    paths: Vec<String>,
    hashes: HashMap<String, ObjectId>,
    /// Id of the resolved subtree at `commit`
    subtree_oid: ObjectId,
}

impl FrontierEntry {
    fn key(&self) -> (i64, &ObjectId) {
        (self.commit.timestamp, &self.commit.oid)
    }

    /// Take over the paths of another entry for the same commit
    fn absorb(&mut self, other: FrontierEntry) {
        self.paths.extend(other.paths);
        self.hashes.extend(other.hashes);
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

pub struct LastModifiedResolver<'g, G: CommitGraph + ?Sized> {
    graph: &'g G,
    hashes: PathHashTracker<'g, G>,
}

impl<'g, G: CommitGraph + ?Sized> LastModifiedResolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        LastModifiedResolver {
            graph,
            hashes: PathHashTracker::new(graph),
        }
    }

    /// Map each path under `subtree` at `start` to the commit that last
    /// modified it
    ///
    /// Paths missing at `start` are left out. Duplicate paths count once.
    /// Any unreadable or corrupt commit or tree aborts the whole call.
    pub fn resolve(
        &self,
        start: &ObjectId,
        subtree: &str,
        paths: &[String],
    ) -> Result<HashMap<String, CommitNode>, BrowseError> {
        let mut seen = HashSet::new();
        let paths = paths
            .iter()
            .filter(|path| seen.insert(path.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        let mut results = HashMap::new();
        if paths.is_empty() {
            return Ok(results);
        }

        tracing::debug!(%start, subtree, paths = paths.len(), "resolving last modified commits");

        let start = self.graph.commit_node(start)?;
        let Some(root) = self.hashes.snapshots().subtree(&start, subtree)? else {
            tracing::debug!(subtree, "subtree missing at start commit");
            return Ok(results);
        };

        let hashes = self.hashes.hashes_in(&root, &paths)?;
        let paths = paths
            .into_iter()
            .filter(|path| hashes.contains_key(path))
            .collect::<Vec<_>>();
        if paths.is_empty() {
            return Ok(results);
        }

        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            commit: start,
            paths,
            hashes,
            subtree_oid: root.oid().clone(),
        });

        let mut visited = 0usize;
        while let Some(mut current) = frontier.pop() {
            while frontier
                .peek()
                .is_some_and(|next| next.commit.oid == current.commit.oid)
            {
                if let Some(next) = frontier.pop() {
                    current.absorb(next);
                }
            }

            current.paths.retain(|path| !results.contains_key(path));
            if current.paths.is_empty() {
                continue;
            }

            visited += 1;
            tracing::trace!(
                commit = %current.commit.oid,
                pending = current.paths.len(),
                queued = frontier.len(),
                "visiting commit"
            );

            self.step(current, subtree, &mut frontier, &mut results)?;
        }

        tracing::debug!(visited, resolved = results.len(), "last modified commits resolved");

        Ok(results)
    }

    fn step(
        &self,
        current: FrontierEntry,
        subtree: &str,
        frontier: &mut BinaryHeap<FrontierEntry>,
        results: &mut HashMap<String, CommitNode>,
    ) -> Result<(), BrowseError> {
        let parents = self.graph.parents(&current.commit)?;

        let mut parent_hashes = Vec::with_capacity(parents.len());
        for parent in &parents {
            parent_hashes.push(self.hashes_at(parent, subtree, &current)?);
        }

        let mut assigned = vec![Vec::new(); parents.len()];
        for path in &current.paths {
            let hash = current.hashes.get(path);
            let unchanged_in = parent_hashes
                .iter()
                .position(|(_, hashes)| hash.is_some() && hashes.get(path) == hash);

            match unchanged_in {
                Some(index) => assigned[index].push(path.clone()),
                None => {
                    results
                        .entry(path.clone())
                        .or_insert_with(|| current.commit.clone());
                }
            }
        }

        for ((parent, (subtree_oid, mut hashes)), paths) in
            parents.into_iter().zip(parent_hashes).zip(assigned)
        {
            let Some(subtree_oid) = subtree_oid.filter(|_| !paths.is_empty()) else {
                continue;
            };

            hashes.retain(|path, _| paths.contains(path));
            frontier.push(FrontierEntry {
                commit: parent,
                paths,
                hashes,
                subtree_oid,
            });
        }

        Ok(())
    }

    /// Hashes of the current entry's paths at a parent commit
    ///
    /// An identical subtree id means identical content for every path, so
    /// the current hashes are reused without descending.
    fn hashes_at(
        &self,
        parent: &CommitNode,
        subtree: &str,
        current: &FrontierEntry,
    ) -> Result<(Option<ObjectId>, HashMap<String, ObjectId>), BrowseError> {
        let Some(root) = self.hashes.snapshots().subtree(parent, subtree)? else {
            return Ok((None, HashMap::new()));
        };

        let hashes = if root.oid() == &current.subtree_oid {
            current.hashes.clone()
        } else {
            self.hashes.hashes_in(&root, &current.paths)?
        };

        Ok((Some(root.oid().clone()), hashes))
    }

    /// [`Self::resolve`], with every result commit loaded once into a
    /// [`LastCommit`]
    pub fn resolve_last_modified(
        &self,
        start: &ObjectId,
        subtree: &str,
        paths: &[String],
    ) -> Result<BTreeMap<String, LastCommit>, BrowseError> {
        let nodes = self.resolve(start, subtree, paths)?;

        let mut commits: HashMap<ObjectId, LastCommit> = HashMap::new();
        for node in nodes.values() {
            if !commits.contains_key(&node.oid) {
                let commit = self.graph.commit(&node.oid)?;
                commits.insert(
                    node.oid.clone(),
                    LastCommit::from_commit(node.oid.clone(), &commit),
                );
            }
        }

        Ok(nodes
            .into_iter()
            .filter_map(|(path, node)| commits.get(&node.oid).map(|last| (path, last.clone())))
            .collect())
    }
}
