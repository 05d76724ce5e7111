//! Error types for rungo-fetch.

use std::io;
use std::path::PathBuf;

use rungo_verify::VerifyError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] BoxError),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("request to {url} failed due to non-2XX response: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("response from {url} too short: expected at least {expected} bytes, got {actual}")]
    ShortBody {
        url: String,
        expected: usize,
        actual: usize,
    },

    #[error("reading response from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed checksum from {url}: {source}")]
    MalformedChecksum {
        url: String,
        #[source]
        source: VerifyError,
    },

    #[error("failed to verify archive from {url}: {source}")]
    IntegrityMismatch {
        url: String,
        path: PathBuf,
        #[source]
        source: VerifyError,
    },

    #[error("copy of {url} to '{path}' failed: {source}")]
    Download {
        url: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Fs(#[from] rungo_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
