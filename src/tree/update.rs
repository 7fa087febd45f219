use bincode::{Decode, Encode};
use derive_more::Display;

/// The two independently tracked views of every path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Encode, Decode)]
pub enum Side {
    #[display("local")]
    Local,
    #[display("remote")]
    Remote,
}

impl Side {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "local" => Some(Side::Local),
            "remote" => Some(Side::Remote),
            _ => None,
        }
    }
}

/// Optional fields of an [`Update`]. Every field not set by the caller keeps
/// its default: not a directory, not deleted, no symlink target and a
/// modification time of `0`, which asks the tree to assign a tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub directory: bool,
    pub delete: bool,
    pub symlink: String,
    pub mod_time: u64,
}

/// The observed state of a single path on one side at one instant.
///
/// This is also the shape exchanged with the peer, so defaults are
/// significant: a record always replaces the previous one as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Update {
    path: String,
    directory: bool,
    delete: bool,
    symlink: String,
    mod_time: u64,
}

impl Update {
    /// A plain file record with every optional field at its default.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_options(path, UpdateOptions::default())
    }

    pub fn with_options(path: impl Into<String>, options: UpdateOptions) -> Self {
        let UpdateOptions {
            directory,
            delete,
            symlink,
            mod_time,
        } = options;
        Self {
            path: path.into(),
            directory,
            delete,
            symlink,
            mod_time,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self::with_options(
            path,
            UpdateOptions {
                directory: true,
                ..Default::default()
            },
        )
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self::with_options(
            path,
            UpdateOptions {
                delete: true,
                ..Default::default()
            },
        )
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_directory(&self) -> bool {
        self.directory
    }

    pub fn is_delete(&self) -> bool {
        self.delete
    }

    pub fn symlink(&self) -> &str {
        &self.symlink
    }

    pub fn mod_time(&self) -> u64 {
        self.mod_time
    }

    /// Whether a node holding this record may keep children.
    pub fn allows_children(&self) -> bool {
        self.directory && !self.delete
    }

    /// Compares everything except the modification time.
    pub fn is_equivalent_ignoring_time(&self, other: &Update) -> bool {
        self.directory == other.directory
            && self.delete == other.delete
            && self.symlink == other.symlink
            && self.path == other.path
    }

    pub(crate) fn with_mod_time(self, mod_time: u64) -> Self {
        Self { mod_time, ..self }
    }
}

/// A record together with the side it was reported for.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct SideUpdate {
    pub side: Side,
    pub update: Update,
}

impl SideUpdate {
    pub fn new(side: Side, update: Update) -> Self {
        Self { side, update }
    }
}
