use crate::artifacts::browse::commit_graph::CommitGraph;
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Every ancestor of a start commit (itself included), newest committer
/// time first, each commit once
///
/// Equal timestamps are broken by the greater object id. A read failure is
/// yielded once, after which the walk ends.
pub struct RevList<'g, G: CommitGraph + ?Sized> {
    graph: &'g G,
    queue: BinaryHeap<(i64, ObjectId)>,
    seen: HashSet<ObjectId>,
    /// Commits loaded when queued, waiting to be yielded
    loaded: HashMap<ObjectId, Commit>,
    error: Option<BrowseError>,
}

impl<'g, G: CommitGraph + ?Sized> RevList<'g, G> {
    pub fn new(graph: &'g G, start: &ObjectId) -> Self {
        let mut rev_list = RevList {
            graph,
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            loaded: HashMap::new(),
            error: None,
        };

        if let Err(error) = rev_list.enqueue(start) {
            rev_list.error = Some(error);
        }

        rev_list
    }

    fn enqueue(&mut self, oid: &ObjectId) -> Result<(), BrowseError> {
        if !self.seen.insert(oid.clone()) {
            return Ok(());
        }

        let commit = self.graph.commit(oid)?;
        self.queue.push((commit.timestamp().timestamp(), oid.clone()));
        self.loaded.insert(oid.clone(), commit);

        Ok(())
    }
}

impl<G: CommitGraph + ?Sized> Iterator for RevList<'_, G> {
    type Item = Result<(ObjectId, Commit), BrowseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.error.take() {
            self.queue.clear();
            self.loaded.clear();
            return Some(Err(error));
        }

        let (_, oid) = self.queue.pop()?;
        let commit = self.loaded.remove(&oid)?;

        for parent in commit.parents() {
            if let Err(error) = self.enqueue(parent) {
                // yield this commit first; the failure comes next
                self.error = Some(error);
                break;
            }
        }

        Some(Ok((oid, commit)))
    }
}
