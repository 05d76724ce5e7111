//! Error types for delegation.

use std::env::JoinPathsError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command not found: '{0}'")]
    CommandNotFound(String),

    #[error("target not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    #[error("failed to run {}: {source}", path.display())]
    SpawnFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot build PATH: {0}")]
    InvalidSearchPath(#[from] JoinPathsError),
}

pub type Result<T> = std::result::Result<T, Error>;
