use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RefName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

/// Shortest abbreviated object id accepted in a revision
const MIN_ABBREV_LENGTH: usize = 4;

/// A revision expression naming a commit.
///
/// Supported forms:
/// - Ref names: `main`, `v1.0`, `refs/tags/v1.0`, `HEAD`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full or abbreviated object ids (4-40 hex characters), tried only when no
///   ref of that name exists
/// - Parent notation: `<revision>^` (first parent)
/// - Ancestor notation: `<revision>~<n>` (n-th first-parent ancestor)
///
/// Refs and ids naming annotated tags are peeled to the commit they tag.
#[derive(Debug, Clone)]
pub enum Revision {
    /// A ref name, or an object id resolved as a fallback
    Ref(RefName),
    /// The Nth first-parent ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_re = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_re = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_re.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_re.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            Ok(Revision::Ref(RefName::try_parse(resolved_name.to_string())?))
        }
    }

    /// Resolve to a commit id
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Ref(ref_name) => {
                let oid = match repository.refs().read_ref(ref_name)? {
                    Some(oid) => oid,
                    None if Self::looks_like_oid(ref_name.as_ref()) => {
                        Self::resolve_oid(ref_name.as_ref(), repository)?
                    }
                    None => anyhow::bail!(
                        "ambiguous argument '{}': unknown revision or path not in the working tree",
                        ref_name
                    ),
                };

                Self::peel(oid, repository)
            }
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(&base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn peel(oid: ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let obj_type = repository
            .database()
            .get_object_type(&oid)
            .with_context(|| format!("object {} not found", oid))?;

        repository.database().peel_to_commit(&oid)?.ok_or_else(|| {
            anyhow::anyhow!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                obj_type
            )
        })
    }

    fn resolve_commit_parent(oid: &ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let commit = repository
            .database()
            .parse_object_as_commit(oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", oid))?;

        commit
            .parent()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("commit {} has no parent", oid.to_short_oid()))
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if oid_str.len() == OBJECT_ID_LENGTH {
            return ObjectId::try_parse(oid_str.to_string());
        }

        let matches = repository.database().find_objects_by_prefix(oid_str)?;

        match matches.as_slice() {
            [] => anyhow::bail!(
                "ambiguous argument '{}': unknown revision or path not in the working tree",
                oid_str
            ),
            [oid] => Ok(oid.clone()),
            _ => {
                // only commits (or tags peeling to them) are valid candidates
                let commit_matches = matches
                    .iter()
                    .filter(|oid| {
                        repository
                            .database()
                            .get_object_type(oid)
                            .is_ok_and(|t| t == ObjectType::Commit || t == ObjectType::Tag)
                    })
                    .collect::<Vec<_>>();

                match commit_matches.as_slice() {
                    [] => anyhow::bail!(
                        "ambiguous argument '{}': unknown revision or path not in the working tree",
                        oid_str
                    ),
                    [oid] => Ok((*oid).clone()),
                    _ => {
                        let mut error_msg = format!(
                            "short SHA1 {} is ambiguous\nhint: The candidates are:",
                            oid_str
                        );
                        for oid in &commit_matches {
                            error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                        }
                        anyhow::bail!(error_msg)
                    }
                }
            }
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        s.len() >= MIN_ABBREV_LENGTH
            && s.len() <= OBJECT_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
