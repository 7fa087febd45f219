use snafu::{Snafu, ensure};

const SEPARATOR: char = '/';

/// Splits a relative, slash-separated path into its segments.
///
/// The empty path is the root and has no segments.
pub fn parse(path: &str) -> Result<Vec<&str>, InvalidPathError> {
    ensure!(
        !path.starts_with(SEPARATOR),
        InvalidPathSnafu {
            path,
            reason: "starts with a separator"
        }
    );
    ensure!(
        !path.ends_with(SEPARATOR),
        InvalidPathSnafu {
            path,
            reason: "ends with a separator"
        }
    );

    if path.is_empty() {
        return Ok(Vec::new());
    }
    Ok(path.split(SEPARATOR).collect())
}

/// Joins a parent path and a child name the way node paths are stored.
pub(crate) fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(display("Invalid path '{}': {}", path, reason))]
pub struct InvalidPathError {
    path: String,
    reason: &'static str,
}

impl InvalidPathError {
    pub fn path(&self) -> &str {
        &self.path
    }
}
