use anyhow::Result;
use bit_browse::areas::repository::Repository;
use bit_browse::artifacts::branch::ref_name::RefName;
use bit_browse::artifacts::branch::revision::Revision;
use bit_browse::artifacts::core::{PagerWriter, should_page};
use bit_browse::commands::porcelain::log::LogOptions;
use bit_browse::logging::{LOG_ENV, init_logging};
use clap::{Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bit-browse",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Browse git repositories from the terminal",
    long_about = "Read-only views over a git repository: directory listings annotated \
    with the commit that last touched each entry, the commit log and a summary \
    of branches and tags.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "GIT_DIR",
        default_value = ".",
        help = "The repository (work tree or git directory) to browse"
    )]
    git_dir: PathBuf,
    #[arg(
        long,
        global = true,
        env = LOG_ENV,
        default_value = "warn",
        help = "Diagnostics filter, e.g. `debug` or `bit_browse=trace`"
    )]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
struct RevisionArgs {
    #[arg(long, help = "The revision to browse (defaults to HEAD)")]
    rev: Option<String>,
    #[arg(long, help = "Browse the tip of a branch")]
    branch: Option<String>,
    #[arg(long, help = "Browse the commit a tag points at")]
    tag: Option<String>,
}

impl RevisionArgs {
    fn to_revision(&self) -> Result<Revision> {
        match (&self.rev, &self.branch, &self.tag) {
            (_, Some(branch), _) => Ok(Revision::Ref(RefName::branch(branch)?)),
            (_, _, Some(tag)) => Ok(Revision::Ref(RefName::tag(tag)?)),
            (Some(rev), _, _) => Revision::try_parse(rev),
            (None, None, None) => Revision::try_parse("HEAD"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "tree",
        about = "List a directory with the last commit of each entry",
        long_about = "This command lists the entries of a directory at the selected revision. \
        Each entry is shown with the commit that last modified it."
    )]
    Tree {
        #[arg(index = 1, help = "The directory to list (defaults to the root)")]
        path: Option<String>,
        #[command(flatten)]
        revision: RevisionArgs,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command shows every commit reachable from the selected revision, \
        newest first."
    )]
    Log {
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits shown")]
        max_count: Option<usize>,
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
        #[command(flatten)]
        revision: RevisionArgs,
    },
    #[command(
        name = "summary",
        about = "Show an overview of the repository",
        long_about = "This command shows the repository name and description, \
        the last update of the selected revision and all branches and tags."
    )]
    Summary {
        #[command(flatten)]
        revision: RevisionArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let pager = should_page().then(Pager::new);
    let writer: Box<dyn std::io::Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let repository = Repository::open(&cli.git_dir, writer)?;

    match &cli.command {
        Commands::Tree { path, revision } => {
            repository.tree(&revision.to_revision()?, path.as_deref().unwrap_or_default())?
        }
        Commands::Log {
            max_count,
            oneline,
            revision,
        } => {
            let opts = LogOptions {
                max_count: *max_count,
                oneline: *oneline,
            };

            repository.log(&revision.to_revision()?, &opts)?
        }
        Commands::Summary { revision } => repository.summary(&revision.to_revision()?)?,
    }

    drop(repository);
    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
