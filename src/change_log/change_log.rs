use std::path::{Path, PathBuf};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::codec::{self, CodecError};
use crate::ext::YamlMappingExt;
use crate::tree::{Side, SideUpdate, Update, UpdateOptions};

const SNAPSHOT_EXTENSION: &str = "bin";

/// An ordered list of change records to replay into a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    entries: Vec<SideUpdate>,
}

impl ChangeLog {
    /// Reads a YAML change log, or a binary snapshot when the file has a
    /// `.bin` extension.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ChangeLogError> {
        let path = path.as_ref();
        debug!("Reading change log: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        if path.extension().is_some_and(|ext| ext == SNAPSHOT_EXTENSION) {
            return Self::from_snapshot(&bytes);
        }

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.to_path_buf(),
        })?;
        contents.as_str().try_into()
    }

    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, ChangeLogError> {
        let entries = codec::decode_snapshot(bytes).context(SnapshotSnafu)?;
        Ok(ChangeLog { entries })
    }

    pub fn entries(&self) -> &[SideUpdate] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SideUpdate> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn parse_entry(
        index: usize,
        entry: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<SideUpdate, ChangeLogError> {
        let side = match entry.field("side") {
            None => Side::Local,
            Some(value) => value
                .as_str()
                .and_then(Side::from_name)
                .context(InvalidEntrySnafu {
                    index,
                    reason: "side must be 'local' or 'remote'",
                })?,
        };

        let path = entry
            .field("path")
            .and_then(|value| value.as_str())
            .context(InvalidEntrySnafu {
                index,
                reason: "path must be a string",
            })?;

        let directory = Self::bool_field(index, entry, "directory")?;
        let delete = Self::bool_field(index, entry, "delete")?;

        let symlink = match entry.field("symlink") {
            None => String::new(),
            Some(value) => value
                .as_str()
                .context(InvalidEntrySnafu {
                    index,
                    reason: "symlink must be a string",
                })?
                .to_string(),
        };

        let mod_time = match entry.field("mod_time") {
            None => 0,
            Some(value) => value
                .as_integer()
                .and_then(|mod_time| u64::try_from(mod_time).ok())
                .context(InvalidEntrySnafu {
                    index,
                    reason: "mod_time must be a non-negative integer",
                })?,
        };

        let update = Update::with_options(
            path,
            UpdateOptions {
                directory,
                delete,
                symlink,
                mod_time,
            },
        );
        Ok(SideUpdate::new(side, update))
    }

    fn bool_field(
        index: usize,
        entry: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<bool, ChangeLogError> {
        match entry.field(key) {
            None => Ok(false),
            Some(value) => value.as_bool().context(InvalidEntrySnafu {
                index,
                reason: format!("{key} must be a boolean"),
            }),
        }
    }
}

impl TryFrom<&str> for ChangeLog {
    type Error = ChangeLogError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedLogSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let Some(updates) = top_level.field("updates") else {
            debug!("Change log has no updates section");
            return Ok(ChangeLog::default());
        };
        let updates = updates.as_sequence().context(UpdatesNotSequenceSnafu)?;

        let entries = updates
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let entry = entry.as_mapping().context(InvalidEntrySnafu {
                    index,
                    reason: "entry must be a map",
                })?;
                Self::parse_entry(index, entry)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed {} change log entries", entries.len());

        Ok(ChangeLog { entries })
    }
}

#[derive(Debug, Snafu)]
pub enum ChangeLogError {
    #[snafu(display("Failed to read the change log: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Change log {} is not valid UTF-8", file_path.display()))]
    EncodingError {
        file_path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the change log"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Failed to load the change log snapshot"))]
    SnapshotError { source: CodecError },
    #[snafu(display("Improperly formatted change log"))]
    MalformedLog,
    #[snafu(display("Top level of the change log should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Updates section should be a list"))]
    UpdatesNotSequence,
    #[snafu(display("Invalid change log entry #{}: {}", index, reason))]
    InvalidEntry { index: usize, reason: String },
}
