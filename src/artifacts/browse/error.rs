use crate::artifacts::objects::object_id::ObjectId;

/// Failures that abort a last-modified resolution
///
/// A path or subtree that does not exist is never an error; it is simply
/// left out of the result.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("object store unavailable while reading {oid}: {source}")]
    StoreUnavailable {
        oid: ObjectId,
        source: std::io::Error,
    },

    #[error("malformed object {oid}: {reason}")]
    Malformed { oid: ObjectId, reason: String },
}

impl BrowseError {
    pub fn malformed(oid: &ObjectId, reason: impl Into<String>) -> Self {
        BrowseError::Malformed {
            oid: oid.clone(),
            reason: reason.into(),
        }
    }

    pub fn oid(&self) -> &ObjectId {
        match self {
            BrowseError::StoreUnavailable { oid, .. } | BrowseError::Malformed { oid, .. } => oid,
        }
    }
}
