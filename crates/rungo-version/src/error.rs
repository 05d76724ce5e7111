use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no Go version requested: set GO_VERSION or add a {file_name} file")]
    NoVersion { file_name: String },

    #[error("invalid Go version {version:?} from {origin}")]
    InvalidVersion { version: String, origin: String },

    #[error("failed to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
