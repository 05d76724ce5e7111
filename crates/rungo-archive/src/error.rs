use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("archive is corrupted: {0}")]
    Corrupted(#[source] io::Error),

    #[error("zip archive is corrupted: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive entry '{entry}' escapes the extraction root")]
    PathEscape { entry: PathBuf },

    #[error("invalid archive entry path: {0}")]
    InvalidPath(String),

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Fs(#[from] rungo_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
