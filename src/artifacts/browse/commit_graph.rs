use crate::areas::database::Database;
use crate::artifacts::browse::error::BrowseError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;

/// The parts of a commit a history walk needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    pub oid: ObjectId,
    /// In commit order: the first parent comes first
    pub parents: Vec<ObjectId>,
    pub tree_oid: ObjectId,
    /// Committer time, in seconds since the epoch
    pub timestamp: i64,
}

impl CommitNode {
    pub fn from_commit(oid: ObjectId, commit: &Commit) -> Self {
        CommitNode {
            oid,
            parents: commit.parents().to_vec(),
            tree_oid: commit.tree_oid().clone(),
            timestamp: commit.timestamp().timestamp(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Read-only access to commits and trees
///
/// Implementations take `&self` and must tolerate concurrent readers.
pub trait CommitGraph {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, BrowseError>;

    fn tree(&self, oid: &ObjectId) -> Result<Tree, BrowseError>;

    fn commit_node(&self, oid: &ObjectId) -> Result<CommitNode, BrowseError> {
        let commit = self.commit(oid)?;
        Ok(CommitNode::from_commit(oid.clone(), &commit))
    }

    fn parents(&self, node: &CommitNode) -> Result<Vec<CommitNode>, BrowseError> {
        node.parents
            .iter()
            .map(|parent| self.commit_node(parent))
            .collect()
    }
}

impl<G: CommitGraph + ?Sized> CommitGraph for &G {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, BrowseError> {
        (**self).commit(oid)
    }

    fn tree(&self, oid: &ObjectId) -> Result<Tree, BrowseError> {
        (**self).tree(oid)
    }
}

impl CommitGraph for Database {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, BrowseError> {
        match load_object(self, oid)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            other => Err(BrowseError::malformed(
                oid,
                format!("expected commit, found {}", other.object_type()),
            )),
        }
    }

    fn tree(&self, oid: &ObjectId) -> Result<Tree, BrowseError> {
        match load_object(self, oid)? {
            ObjectBox::Tree(tree) => Ok(*tree),
            other => Err(BrowseError::malformed(
                oid,
                format!("expected tree, found {}", other.object_type()),
            )),
        }
    }
}

fn load_object(database: &Database, oid: &ObjectId) -> Result<ObjectBox, BrowseError> {
    let compressed = database
        .read_compressed(oid)
        .map_err(|source| BrowseError::StoreUnavailable {
            oid: oid.clone(),
            source,
        })?;

    Database::decompress(compressed)
        .and_then(Database::decode)
        .map_err(|error| BrowseError::malformed(oid, format!("{error:#}")))
}
