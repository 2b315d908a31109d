use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub max_count: Option<usize>,
    pub oneline: bool,
}

impl Repository {
    pub fn log(&self, revision: &Revision, opts: &LogOptions) -> anyhow::Result<()> {
        let start = revision.resolve(self)?;
        tracing::debug!(%start, ?opts, "walking history");

        let commits = RevList::new(self.database(), &start)
            .take(opts.max_count.unwrap_or(usize::MAX));

        for (index, item) in commits.enumerate() {
            let (commit_oid, commit) = item?;

            if opts.oneline {
                self.show_commit_oneline(&commit_oid, &commit)?;
            } else {
                if index > 0 {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(&commit_oid, &commit)?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {commit_oid}").yellow()
        )?;
        if commit.parents().len() > 1 {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {parents}")?;
        }
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit_oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
