use crate::common::SharedBuffer;
use assert_fs::TempDir;
use bit_browse::areas::repository::Repository;
use bit_browse::artifacts::database::database_entry::DatabaseEntry;
use bit_browse::artifacts::database::entry_mode::{EntryMode, FileMode};
use bit_browse::artifacts::objects::blob::Blob;
use bit_browse::artifacts::objects::commit::{Author, Commit};
use bit_browse::artifacts::objects::object_id::ObjectId;
use bit_browse::artifacts::objects::object_type::ObjectType;
use bit_browse::artifacts::objects::tag::Tag;
use bit_browse::artifacts::objects::tree::Tree;
use chrono::DateTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 2024-01-31 02:05:09 PM UTC
pub const BASE_TIME: i64 = 1_706_709_909;
pub const HOUR: i64 = 3600;

pub const DEFAULT_AUTHOR: &str = "Ada Lovelace";

/// A repository written object by object, without a work tree
pub struct RepositoryFixture {
    _dir: TempDir,
    root: PathBuf,
    repository: Repository,
    output: SharedBuffer,
}

impl RepositoryFixture {
    pub fn init(dir: TempDir) -> Self {
        let root = dir.path().to_path_buf();
        Self::init_at(dir, root, false)
    }

    /// Bare repository in `<dir>/<name>`
    pub fn init_bare(dir: TempDir, name: &str) -> Self {
        let root = dir.path().join(name);
        Self::init_at(dir, root, true)
    }

    fn init_at(dir: TempDir, root: PathBuf, bare: bool) -> Self {
        let output = SharedBuffer::default();
        let repository = Repository::init(&root, bare, Box::new(output.clone()))
            .expect("Failed to initialize repository");

        RepositoryFixture {
            _dir: dir,
            root,
            repository,
            output,
        }
    }

    /// Directory to pass as `--git-dir`
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Everything the repository's commands wrote so far
    pub fn output(&self) -> String {
        self.output.contents()
    }

    /// Store nested trees for `(path, content)` pairs
    pub fn write_tree(&self, files: &[(&str, &str)]) -> ObjectId {
        let mut entries = Vec::new();
        let mut dirs: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();

        for &(path, content) in files {
            match path.split_once('/') {
                Some((dir, rest)) => dirs.entry(dir).or_default().push((rest, content)),
                None => {
                    let oid = self
                        .repository
                        .database()
                        .store(&Blob::from(content))
                        .expect("Failed to store blob");
                    entries.push(DatabaseEntry::new(
                        path.to_string(),
                        oid,
                        EntryMode::File(FileMode::Regular),
                    ));
                }
            }
        }

        for (dir, files) in dirs {
            let oid = self.write_tree(&files);
            entries.push(DatabaseEntry::new(dir.to_string(), oid, EntryMode::Directory));
        }

        self.repository
            .database()
            .store(&Tree::build(entries))
            .expect("Failed to store tree")
    }

    pub fn commit(
        &self,
        parents: &[&ObjectId],
        time: i64,
        files: &[(&str, &str)],
        message: &str,
    ) -> ObjectId {
        self.commit_as(DEFAULT_AUTHOR, parents, time, files, message)
    }

    pub fn commit_as(
        &self,
        author: &str,
        parents: &[&ObjectId],
        time: i64,
        files: &[(&str, &str)],
        message: &str,
    ) -> ObjectId {
        let tree_oid = self.write_tree(files);
        let timestamp = DateTime::from_timestamp(time, 0)
            .expect("Invalid commit time")
            .fixed_offset();
        let email = format!("{}@example.com", author.to_lowercase().replace(' ', "."));
        let commit = Commit::new(
            parents.iter().map(|&parent| parent.clone()).collect(),
            tree_oid,
            Author::new(author.to_string(), email, timestamp),
            format!("{message}\n"),
        );

        self.repository
            .database()
            .store(&commit)
            .expect("Failed to store commit")
    }

    /// Point HEAD's branch at `oid`
    pub fn update_head(&self, oid: &ObjectId) {
        self.repository
            .refs()
            .update_head(oid)
            .expect("Failed to update HEAD");
    }

    pub fn branch(&self, name: &str, oid: &ObjectId) {
        self.repository
            .refs()
            .create_branch(name, oid)
            .expect("Failed to create branch");
    }

    pub fn lightweight_tag(&self, name: &str, oid: &ObjectId) {
        self.repository
            .refs()
            .create_tag(name, oid)
            .expect("Failed to create tag");
    }

    pub fn annotated_tag(&self, name: &str, oid: &ObjectId) -> ObjectId {
        let tag = Tag::new(
            oid.clone(),
            ObjectType::Commit,
            name.to_string(),
            format!("tagger {DEFAULT_AUTHOR} <ada@example.com> {BASE_TIME} +0000\n\nrelease {name}\n"),
        );
        let tag_oid = self
            .repository
            .database()
            .store(&tag)
            .expect("Failed to store tag");
        self.lightweight_tag(name, &tag_oid);

        tag_oid
    }

    pub fn write_description(&self, description: &str) {
        std::fs::write(self.repository.git_dir().join("description"), description)
            .expect("Failed to write description");
    }

    /// Loose file holding `oid`
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.repository.database().objects_path().join(oid.to_path())
    }

    /// Drop an object from the store
    pub fn delete_object(&self, oid: &ObjectId) {
        std::fs::remove_file(self.object_path(oid)).expect("Failed to delete object");
    }

    /// Replace an object with bytes that do not inflate
    pub fn corrupt_object(&self, oid: &ObjectId) {
        let path = self.object_path(oid);
        std::fs::write(&path, b"definitely not zlib").expect("Failed to corrupt object");
    }
}

/// The three-commit history most scenarios start from:
///
/// ```text
/// c1  README.md, src/main.rs, src/lib.rs, docs/guide.md
/// c2  src/lib.rs changed
/// c3  docs/guide.md changed, by Grace Hopper
/// ```
pub struct SampleHistory {
    pub c1: ObjectId,
    pub c2: ObjectId,
    pub c3: ObjectId,
}

impl SampleHistory {
    pub fn write(fixture: &RepositoryFixture) -> Self {
        let c1 = fixture.commit(
            &[],
            BASE_TIME,
            &[
                ("README.md", "hello"),
                ("docs/guide.md", "guide v1"),
                ("src/lib.rs", "lib v1"),
                ("src/main.rs", "main"),
            ],
            "Initial import",
        );
        let c2 = fixture.commit(
            &[&c1],
            BASE_TIME + HOUR,
            &[
                ("README.md", "hello"),
                ("docs/guide.md", "guide v1"),
                ("src/lib.rs", "lib v2"),
                ("src/main.rs", "main"),
            ],
            "Rework the library\n\nLonger explanation.",
        );
        let c3 = fixture.commit_as(
            "Grace Hopper",
            &[&c2],
            BASE_TIME + 2 * HOUR,
            &[
                ("README.md", "hello"),
                ("docs/guide.md", "guide v2"),
                ("src/lib.rs", "lib v2"),
                ("src/main.rs", "main"),
            ],
            "Update the guide",
        );
        fixture.update_head(&c3);

        SampleHistory { c1, c2, c3 }
    }
}
