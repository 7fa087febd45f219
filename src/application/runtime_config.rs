use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub logs: Vec<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub only_diff: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            logs: cli.logs,
            snapshot: cli.snapshot,
            only_diff: cli.only_diff,
        }
    }
}
