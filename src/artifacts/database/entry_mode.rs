//! Tree entry modes
//!
//! The mode stored in front of every tree entry decides what the entry id
//! points at: a blob (regular, executable, symlink), another tree, or a commit
//! in a different repository (submodule, a.k.a. gitlink).

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    #[default]
    Directory,
    Symlink,
    Submodule,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
            EntryMode::Symlink => "120000",
            EntryMode::Submodule => "160000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Directory => 0o40000,
            EntryMode::Symlink => 0o120000,
            EntryMode::Submodule => 0o160000,
        }
    }

    /// Short kind label used in listings
    pub fn kind(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "file",
            EntryMode::File(FileMode::Executable) => "exec",
            EntryMode::Directory => "dir",
            EntryMode::Symlink => "link",
            EntryMode::Submodule => "sub",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Parse the octal mode as written in tree objects
    ///
    /// Git itself writes `40000` for trees; `040000` and the legacy
    /// group-writable `100664` are accepted on read.
    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        let value = u32::from_str_radix(mode, 8)
            .map_err(|_| anyhow::anyhow!("Invalid entry mode: {mode}"))?;

        EntryMode::try_from(value)
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(mode: u32) -> anyhow::Result<Self> {
        match mode {
            0o100644 | 0o100664 => Ok(EntryMode::File(FileMode::Regular)),
            0o100755 => Ok(EntryMode::File(FileMode::Executable)),
            0o40000 => Ok(EntryMode::Directory),
            0o120000 => Ok(EntryMode::Symlink),
            0o160000 => Ok(EntryMode::Submodule),
            _ => Err(anyhow::anyhow!("Invalid entry mode: {mode:o}")),
        }
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}
