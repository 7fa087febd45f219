use std::path::PathBuf;

use compio::fs;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::change_log::{ChangeLog, ChangeLogError};
use crate::codec::{self, CodecError};
use crate::render::TreePrinter;
use crate::tree::{ApplyOutcome, InvalidPathError, SharedTree, SideUpdate};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let tree = Self::replay(&app_config).await?;

        let printer = TreePrinter::new(app_config.only_diff);
        let output = tree.read(|tree| printer.render(tree));
        print!("{output}");

        Ok(())
    }

    /// Applies every change log in order to a fresh tree and writes the
    /// snapshot if one was requested.
    pub async fn replay(app_config: &RuntimeConfig) -> Result<SharedTree, ApplicationError> {
        let tree = SharedTree::new_root();

        for log_path in &app_config.logs {
            let log = ChangeLog::read(log_path).await.context(ChangeLogSnafu)?;
            debug!("Loaded {} entries from {}", log.len(), log_path.display());

            let (stored, unchanged) = tree.write(|tree| {
                let mut stored = 0;
                let mut unchanged = 0;
                for SideUpdate { side, update } in log.into_entries() {
                    match tree.apply(side, update) {
                        Ok(ApplyOutcome::Stored { .. }) => stored += 1,
                        Ok(ApplyOutcome::Unchanged) => unchanged += 1,
                        Err(source) => {
                            return Err(ApplicationError::InvalidUpdateError {
                                log_path: log_path.clone(),
                                source,
                            });
                        }
                    }
                }
                Ok((stored, unchanged))
            })?;
            info!(
                "Applied {}: {} stored, {} unchanged",
                log_path.display(),
                stored,
                unchanged
            );
        }

        if let Some(snapshot_path) = &app_config.snapshot {
            let records = tree.read(|tree| tree.records());
            let bytes = codec::encode_snapshot(&records).context(SnapshotEncodeSnafu)?;
            fs::write(snapshot_path, bytes)
                .await
                .0
                .context(SnapshotWriteSnafu {
                    file_path: snapshot_path.clone(),
                })?;
            info!(
                "Wrote {} records to {}",
                records.len(),
                snapshot_path.display()
            );
        }

        Ok(tree)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load a change log"))]
    ChangeLogError { source: ChangeLogError },
    #[snafu(display("Change log {} contains an invalid update", log_path.display()))]
    InvalidUpdateError {
        log_path: PathBuf,
        source: InvalidPathError,
    },
    #[snafu(display("Failed to encode the snapshot"))]
    SnapshotEncodeError { source: CodecError },
    #[snafu(display("Failed to write the snapshot to {}", file_path.display()))]
    SnapshotWriteError {
        file_path: PathBuf,
        source: std::io::Error,
    },
}
