use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::SymRefName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::format_listing_date;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Overview of the repository: name, description, the state of
    /// `revision`, then every branch and tag
    pub fn summary(&self, revision: &Revision) -> anyhow::Result<()> {
        let commit_oid = revision.resolve(self)?;
        let commit = self
            .database()
            .parse_object_as_commit(&commit_oid)?
            .with_context(|| format!("commit {commit_oid} not found"))?;

        writeln!(self.writer(), "{:<12} {}", "name:", self.name().bold())?;

        if let Some(description) = self.description()? {
            let mut lines = description.lines();
            let tagline = lines.next().unwrap_or_default().trim();
            writeln!(self.writer(), "{:<12} {}", "tagline:", tagline)?;

            let rest = lines.collect::<Vec<_>>().join("\n");
            if !rest.trim().is_empty() {
                writeln!(self.writer(), "{:<12} {}", "description:", rest.trim())?;
            }
        }

        writeln!(
            self.writer(),
            "{:<12} {}",
            "updated:",
            format_listing_date(&commit.committed_at_utc())
        )?;
        writeln!(
            self.writer(),
            "{:<12} {}",
            "author:",
            commit.author().display_name()
        )?;
        writeln!(
            self.writer(),
            "{:<12} {} {}",
            "commit:",
            commit_oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        let branches = self.refs().list_branches()?;
        let tags = self.refs().list_tags()?;

        self.show_ref_section("branches", &branches)?;
        self.show_ref_section("tags", &tags)?;

        Ok(())
    }

    fn show_ref_section(&self, title: &str, refs: &[(SymRefName, ObjectId)]) -> anyhow::Result<()> {
        writeln!(self.writer())?;
        writeln!(self.writer(), "{title}:")?;

        if refs.is_empty() {
            writeln!(self.writer(), "  (none)")?;
            return Ok(());
        }

        let width = refs
            .iter()
            .map(|(name, _)| name.short_name().len())
            .max()
            .unwrap_or_default();

        for (name, oid) in refs {
            // annotated tags are listed by the commit they point at
            let target = match self.database().peel_to_commit(oid) {
                Ok(Some(commit_oid)) => commit_oid,
                Ok(None) => {
                    tracing::debug!(%name, %oid, "ref does not point at a commit");
                    oid.clone()
                }
                Err(error) => {
                    tracing::warn!(error = %format_args!("{error:#}"), %name, %oid, "unable to peel ref");
                    oid.clone()
                }
            };

            writeln!(
                self.writer(),
                "  {:<width$} {}",
                name.short_name().green(),
                target.to_short_oid().yellow()
            )?;
        }

        Ok(())
    }
}
