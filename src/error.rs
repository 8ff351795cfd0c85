//! Error taxonomy for the rewrite pipeline.
//!
//! Only configuration problems are fatal. File access failures are
//! carried per file so a batch can keep going.

use std::path::PathBuf;

/// Which side of a file round-trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOp {
    Read,
    Write,
}

impl std::fmt::Display for FileOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOp::Read => f.write_str("read"),
            FileOp::Write => f.write_str("write"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MendError {
    /// The prompt subdirectory is absent under the given root.
    #[error("prompt directory not found: {} (is the root correct?)", .0.display())]
    MissingPromptDir(PathBuf),

    /// The prompt subdirectory exists but cannot be listed.
    #[error("cannot list prompt directory {}: {source}", path.display())]
    UnreadablePromptDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unusable catalog, directive, or config file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Per-file read or write failure.
    #[error("failed to {op} {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        op: FileOp,
        #[source]
        source: std::io::Error,
    },
}

impl MendError {
    /// Fatal errors abort the batch; everything else is reported per file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MendError::MissingPromptDir(_)
                | MendError::UnreadablePromptDir { .. }
                | MendError::InvalidConfig(_)
        )
    }
}

pub type Result<T, E = MendError> = std::result::Result<T, E>;
