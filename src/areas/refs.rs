//! Git references (branches, HEAD, tags)
//!
//! References are human-readable names pointing to objects. They can be:
//! - Direct: containing a 40-character object id
//! - Symbolic: `ref: <path>`, pointing to another reference (HEAD -> refs/heads/master)
//!
//! Loose reference files take precedence over entries in `packed-refs`,
//! which is consulted only when no loose file exists for a name.

use crate::artifacts::branch::ref_name::{RefName, SymRefName};
use crate::artifacts::branch::{HEADS_PREFIX, TAGS_PREFIX};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Symbolic references deeper than this are treated as a loop
const MAX_SYMREF_DEPTH: usize = 10;

/// Git references manager
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (`.git` or the bare repository root)
    path: Box<Path>,
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(
                ObjectId::try_parse(content.to_string())
                    .with_context(|| format!("invalid ref file at {:?}", path))?,
            )))
        }
    }
}

impl Refs {
    /// Follow HEAD to the reference it ultimately names
    ///
    /// Returns `refs/heads/<branch>` for an attached HEAD (even when the
    /// branch has no commits yet), or `HEAD` itself when detached.
    pub fn current_ref(&self, source: Option<SymRefName>) -> anyhow::Result<SymRefName> {
        let mut current = source.unwrap_or_else(|| SymRefName::new(HEAD_REF_NAME.to_string()));

        for _ in 0..MAX_SYMREF_DEPTH {
            let ref_content =
                SymRefOrOid::read_symref_or_oid(self.path.join(current.as_ref_path()).as_path())?;

            match ref_content {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(_) | None => return Ok(current),
            }
        }

        anyhow::bail!("symbolic ref loop at {}", current)
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid(&SymRefName::new(HEAD_REF_NAME.to_string()))
    }

    /// Read the object id a full reference path points to, following
    /// symbolic references and falling back to `packed-refs`
    pub fn read_oid(&self, sym_ref_name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        let mut current = sym_ref_name.clone();

        for _ in 0..MAX_SYMREF_DEPTH {
            let ref_path = self.path.join(current.as_ref_path());

            match SymRefOrOid::read_symref_or_oid(&ref_path)? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return Ok(self.read_packed_refs()?.remove(&current)),
            }
        }

        anyhow::bail!("symbolic ref loop at {}", sym_ref_name)
    }

    /// Resolve a short or qualified name, trying `<name>`, `refs/<name>`,
    /// `refs/tags/<name>` and `refs/heads/<name>` in turn
    pub fn read_ref(&self, ref_name: &RefName) -> anyhow::Result<Option<ObjectId>> {
        for candidate in ref_name.candidates() {
            if let Some(oid) = self.read_oid(&candidate)? {
                return Ok(Some(oid));
            }
        }

        Ok(None)
    }

    /// Point a reference at a commit, creating the file if needed
    pub fn update_ref(&self, sym_ref_name: &SymRefName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(
            self.path.join(sym_ref_name.as_ref_path()).into_boxed_path(),
            format!("{oid}\n"),
        )
    }

    /// Advance whatever HEAD points at (the current branch, or HEAD itself
    /// when detached)
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.current_ref(None)?;
        self.update_ref(&target, oid)
    }

    /// Attach HEAD to a branch
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(
            self.head_path(),
            format!("ref: {HEADS_PREFIX}{branch}\n"),
        )
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn create_branch(&self, name: &str, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch = RefName::branch(name)?;
        self.update_ref(&SymRefName::new(branch.as_ref().to_string()), source_oid)
    }

    pub fn create_tag(&self, name: &str, target: &ObjectId) -> anyhow::Result<()> {
        let tag = RefName::tag(name)?;
        self.update_ref(&SymRefName::new(tag.as_ref().to_string()), target)
    }

    /// Branches with the ids they point at, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<(SymRefName, ObjectId)>> {
        self.list_refs(HEADS_PREFIX)
    }

    /// Tags with the ids they point at (possibly annotated tag objects)
    pub fn list_tags(&self) -> anyhow::Result<Vec<(SymRefName, ObjectId)>> {
        self.list_refs(TAGS_PREFIX)
    }

    fn list_refs(&self, prefix: &str) -> anyhow::Result<Vec<(SymRefName, ObjectId)>> {
        let mut refs = self
            .read_packed_refs()?
            .into_iter()
            .filter(|(name, _)| name.as_ref_path().starts_with(prefix))
            .collect::<BTreeMap<_, _>>();

        let loose_root = self.path.join(prefix);
        for entry in WalkDir::new(&loose_root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
        {
            let Ok(relative_path) = entry.path().strip_prefix(self.path.as_ref()) else {
                continue;
            };
            let name = SymRefName::new(relative_path.to_string_lossy().replace('\\', "/"));

            if let Some(oid) = self.read_oid(&name)? {
                refs.insert(name, oid);
            }
        }

        Ok(refs.into_iter().collect())
    }

    /// Parse `packed-refs`: `<oid> <refname>` lines; comments and peeled
    /// (`^<oid>`) lines are skipped
    fn read_packed_refs(&self) -> anyhow::Result<BTreeMap<SymRefName, ObjectId>> {
        let packed_path = self.path.join("packed-refs");
        if !packed_path.is_file() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&packed_path)
            .with_context(|| format!("failed to read {:?}", packed_path))?;

        let mut refs = BTreeMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('^') {
                continue;
            }

            let (oid, name) = line
                .split_once(' ')
                .with_context(|| format!("malformed packed-refs line: {line}"))?;
            refs.insert(
                SymRefName::new(name.to_string()),
                ObjectId::try_parse(oid.to_string())?,
            );
        }

        Ok(refs)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
