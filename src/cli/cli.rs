use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Replays change logs into an update tree and prints what each side holds.
#[derive(Parser, Debug, Clone)]
#[command(name = "mirror-tree", version)]
pub struct Cli {
    /// Change logs to apply, in order. Files ending in `.bin` are read as snapshots
    #[clap(required = true)]
    pub logs: Vec<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Write the resulting records to this snapshot file
    #[clap(long, short)]
    pub snapshot: Option<PathBuf>,

    /// Only print paths where the local and remote records disagree
    #[clap(long)]
    pub only_diff: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_logs_and_flags() {
        let cli = Cli::try_parse_from([
            "mirror-tree",
            "--log-level",
            "debug",
            "--snapshot",
            "out.bin",
            "--only-diff",
            "first.yaml",
            "second.bin",
        ])
        .unwrap();
        assert_eq!(cli.logs, [PathBuf::from("first.yaml"), PathBuf::from("second.bin")]);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.snapshot, Some(PathBuf::from("out.bin")));
        assert!(cli.only_diff);
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["mirror-tree", "log.yaml"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.snapshot, None);
        assert!(!cli.only_diff);
    }

    #[test]
    fn requires_at_least_one_log() {
        assert!(Cli::try_parse_from(["mirror-tree"]).is_err());
    }
}
