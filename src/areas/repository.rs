use crate::areas::database::Database;
use crate::areas::refs::Refs;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BRANCH: &str = "master";
const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

pub struct Repository {
    git_dir: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open an existing repository
    ///
    /// `path` may be a work tree containing `.git`, the `.git` directory
    /// itself, or a bare repository.
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("repository path {} does not exist", path.display()))?;

        let git_dir = Self::locate_git_dir(&path).with_context(|| {
            format!("not a git repository: {}", path.display())
        })?;

        Ok(Self::at(git_dir, writer))
    }

    /// Create an empty repository with HEAD on `master`
    ///
    /// With `bare` the layout is created directly under `path`, otherwise
    /// under `path/.git`.
    pub fn init(path: &Path, bare: bool, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git_dir = if bare {
            path.to_path_buf()
        } else {
            path.join(".git")
        };

        let repository = Self::at(git_dir, writer);

        fs::create_dir_all(repository.database().objects_path())
            .context("Failed to create objects directory")?;
        fs::create_dir_all(repository.refs().heads_path())
            .context("Failed to create refs/heads directory")?;
        fs::create_dir_all(repository.refs().tags_path())
            .context("Failed to create refs/tags directory")?;

        repository
            .refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        let description_path = repository.git_dir.join("description");
        if !description_path.exists() {
            fs::write(&description_path, DEFAULT_DESCRIPTION)
                .context("Failed to create description file")?;
        }

        Ok(repository)
    }

    fn at(git_dir: PathBuf, writer: Box<dyn std::io::Write>) -> Self {
        let database = Database::new(git_dir.join("objects").into_boxed_path());
        let refs = Refs::new(git_dir.clone().into_boxed_path());

        Repository {
            git_dir: git_dir.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs,
        }
    }

    fn locate_git_dir(path: &Path) -> Option<PathBuf> {
        let dot_git = path.join(".git");
        if Self::looks_like_git_dir(&dot_git) {
            return Some(dot_git);
        }

        Self::looks_like_git_dir(path).then(|| path.to_path_buf())
    }

    fn looks_like_git_dir(path: &Path) -> bool {
        path.join("HEAD").is_file() && path.join("objects").is_dir()
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Repository name derived from its directory, without a `.git` suffix
    pub fn name(&self) -> String {
        let dir = if self.git_dir.file_name().is_some_and(|name| name == ".git") {
            self.git_dir.parent().unwrap_or(&self.git_dir)
        } else {
            &self.git_dir
        };

        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        name.strip_suffix(".git").map(str::to_string).unwrap_or(name)
    }

    /// Contents of the `description` file, if any
    ///
    /// The first line is the tagline; the default placeholder written by
    /// `git init` counts as no description.
    pub fn description(&self) -> anyhow::Result<Option<String>> {
        let path = self.git_dir.join("description");
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if content.trim().is_empty() || content.starts_with("Unnamed repository") {
            return Ok(None);
        }

        Ok(Some(content))
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
