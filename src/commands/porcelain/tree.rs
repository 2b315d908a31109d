use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::browse::commit_graph::CommitGraph;
use crate::artifacts::browse::last_modified::LastCommit;
use crate::artifacts::browse::resolve_last_modified;
use crate::artifacts::browse::snapshot::{TreeSnapshotResolver, components};
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::commands::porcelain::format_listing_date;
use anyhow::Context;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;

const MISSING: &str = "-";

impl Repository {
    /// List the entries of `path` at `revision`, each with the commit that
    /// last modified it
    ///
    /// A failing history walk only drops the annotations; the listing itself
    /// is still printed.
    pub fn tree(&self, revision: &Revision, path: &str) -> anyhow::Result<()> {
        let commit_oid = revision.resolve(self)?;
        let commit = self
            .database()
            .commit_node(&commit_oid)
            .with_context(|| format!("unable to read commit {commit_oid}"))?;

        let path = components(path).collect::<Vec<_>>().join("/");
        let entries = TreeSnapshotResolver::new(self.database())
            .entries(&commit, &path)?
            .with_context(|| format!("path '{path}' not found in {revision}"))?;

        let names = entries
            .iter()
            .map(|entry| entry.name.clone())
            .collect::<Vec<_>>();

        let last_commits = match resolve_last_modified(self.database(), &commit_oid, &path, &names)
        {
            Ok(last_commits) => last_commits,
            Err(error) => {
                tracing::warn!(%error, %commit_oid, path = %path, "listing without last-modified commits");
                BTreeMap::new()
            }
        };

        for entry in &entries {
            self.show_tree_entry(entry, last_commits.get(&entry.name))?;
        }

        Ok(())
    }

    fn show_tree_entry(
        &self,
        entry: &DatabaseEntry,
        last_commit: Option<&LastCommit>,
    ) -> anyhow::Result<()> {
        let name = if entry.is_tree() {
            entry.name.blue().bold().to_string()
        } else {
            entry.name.clone()
        };

        write!(
            self.writer(),
            "{:0>6} {} {}\t",
            entry.mode.as_str(),
            entry.mode.kind(),
            name
        )?;

        match last_commit {
            Some(last_commit) => writeln!(
                self.writer(),
                "{} {} {}\t{}",
                last_commit.oid.to_short_oid().yellow(),
                format_listing_date(&last_commit.committed_at),
                last_commit.author_name,
                last_commit.subject()
            )?,
            None => writeln!(
                self.writer(),
                "{MISSING} {MISSING} {MISSING}\t{MISSING}"
            )?,
        }

        Ok(())
    }
}
