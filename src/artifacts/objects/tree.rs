//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files
//! (blobs), subdirectories (other trees), symlinks and submodules, along with
//! their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! ## Ordering
//!
//! Entries are sorted by name, except that directory names compare as if they
//! ended with `/`. Trees read from the database keep their on-disk order;
//! trees built in memory are sorted that way so their ids match git's.
//!
//! ## Names
//!
//! Entry names are decoded as UTF-8, with invalid sequences replaced. Two
//! names differing only in invalid bytes then look alike: both entries are
//! kept and listed, and lookup by name finds the first. A tree decoded from
//! such bytes does not serialise back to its original id, so the id of a
//! stored tree is always the one it was looked up by.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::database::entry_mode::EntryMode;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Git tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<DatabaseEntry>,
    positions: HashMap<String, usize>,
}

impl Tree {
    /// Build a tree from entries in any order
    ///
    /// Later entries with a duplicate name replace earlier ones.
    pub fn build(entries: impl IntoIterator<Item = DatabaseEntry>) -> Self {
        let mut by_name = HashMap::new();
        for entry in entries {
            by_name.insert(entry.name.clone(), entry);
        }

        let mut entries = by_name.into_values().collect::<Vec<_>>();
        entries.sort_by_cached_key(Self::sort_key);

        Self::from_ordered(entries)
    }

    fn from_ordered(entries: Vec<DatabaseEntry>) -> Self {
        let mut positions = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            positions.entry(entry.name.clone()).or_insert(position);
        }

        Tree { entries, positions }
    }

    fn sort_key(entry: &DatabaseEntry) -> Vec<u8> {
        let mut key = entry.name.as_bytes().to_vec();
        if entry.is_tree() {
            key.push(b'/');
        }
        key
    }

    pub fn entries(&self) -> impl Iterator<Item = &DatabaseEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&DatabaseEntry> {
        self.positions
            .get(name)
            .and_then(|&position| self.entries.get(position))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize_content(&self) -> anyhow::Result<Bytes> {
        let mut content = Vec::new();

        for entry in &self.entries {
            write!(content, "{:o} {}", entry.mode.as_u32(), entry.name)?;
            content.push(0);
            entry.oid.write_h40_to(&mut content)?;
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                anyhow::bail!("unexpected EOF in mode");
            }
            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                anyhow::bail!("unexpected EOF in name");
            }
            let name = String::from_utf8_lossy(&name_bytes).into_owned();

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            entries.push(DatabaseEntry::new(name, oid, mode));
        }

        Ok(Self::from_ordered(entries))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                let object_type = match entry.mode {
                    EntryMode::Directory => "tree",
                    EntryMode::Submodule => "commit",
                    _ => "blob",
                };
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    object_type,
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
