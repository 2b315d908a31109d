use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Upper bound on tag-to-tag indirections followed when peeling
const MAX_PEEL_DEPTH: usize = 16;

/// Loose object database
///
/// Holds no mutable state, so a shared reference can serve any number of
/// concurrent readers.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Load and decompress an object, header included
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let compressed = self
            .read_compressed(object_id)
            .with_context(|| format!("Unable to read object {object_id}"))?;

        Self::decompress(compressed)
    }

    /// Read the raw (still compressed) object file
    ///
    /// Kept separate from decoding so callers can tell an unreadable store
    /// apart from a corrupt object.
    pub fn read_compressed(&self, object_id: &ObjectId) -> std::io::Result<Bytes> {
        std::fs::read(self.path.join(object_id.to_path())).map(Bytes::from)
    }

    /// Store an object unless it already exists, returning its id
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        Self::decode(self.load(object_id)?)
            .with_context(|| format!("Malformed object {object_id}"))
    }

    /// Decode a decompressed object (header and content)
    pub fn decode(object_content: Bytes) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = Self::split_header(object_content)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
            ObjectType::Tag => Ok(ObjectBox::Tag(Box::new(Tag::deserialize(object_reader)?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(Some(*blob)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        match self.parse_object(object_id)? {
            ObjectBox::Tree(tree) => Ok(Some(*tree)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(Some(*commit)),
            _ => Ok(None),
        }
    }

    /// Follow annotated tags until reaching a non-tag object
    ///
    /// Returns the commit id, or None when the chain ends at something else.
    pub fn peel_to_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let mut current = object_id.clone();

        for _ in 0..MAX_PEEL_DEPTH {
            match self.parse_object(&current)? {
                ObjectBox::Commit(_) => return Ok(Some(current)),
                ObjectBox::Tag(tag) => current = tag.target().clone(),
                _ => return Ok(None),
            }
        }

        anyhow::bail!("tag chain starting at {object_id} is too deep")
    }

    fn split_header(object_content: Bytes) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let total = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;
        let remaining = total - object_reader.position() as usize;
        if remaining != size {
            anyhow::bail!("object size mismatch: header says {size}, found {remaining}");
        }

        Ok((object_type, object_reader))
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    pub fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated OIDs. An empty result means no match;
    /// more than one result means the prefix is ambiguous.
    ///
    /// # Performance
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For prefixes of 0-1 characters, must search all directories (slower)
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let dir_names = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        let mut matches = Vec::new();
        for dir_name in dir_names {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let full_oid = format!("{}{}", dir_name, file_name.to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let content = self.load(object_id)?;
        let (object_type, _) = ObjectType::parse_header(&mut Cursor::new(content))?;
        Ok(object_type)
    }
}
