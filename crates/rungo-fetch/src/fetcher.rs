use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rungo_fs::{Marker, ensure_dir};
use rungo_verify::{Sha256Digest, Sha256Hasher, VerifiedReader};
use tracing::{debug, info};

use crate::checksum::fetch_sha256;
use crate::error::{Error, Result};
use crate::http::HttpClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Archive and download marker were already present.
    Cached,
    Downloaded { bytes: u64 },
}

/// Downloads archives and their digests through an [`HttpClient`].
pub struct Fetcher<C> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// See [`fetch_sha256`].
    pub fn sha256(&self, url: &str, cache_path: &Path) -> Result<Sha256Digest> {
        fetch_sha256(&self.client, url, cache_path)
    }

    /// Make `destination` hold the bytes of `url` whose digest is `expected`.
    ///
    /// `marker` is trusted: if it and `destination` both exist nothing is
    /// read or re-hashed. Otherwise the marker is cleared, the body is
    /// streamed into `destination` while being hashed, and the marker is set
    /// only after the digest matches. On mismatch the written file is left
    /// in place, unmarked, and the next call downloads it again.
    pub fn download(
        &self,
        url: &str,
        expected: &Sha256Digest,
        destination: &Path,
        marker: &Marker,
    ) -> Result<FetchOutcome> {
        if destination.is_file() && marker.exists() {
            debug!("file {} already downloaded, skipping", destination.display());
            return Ok(FetchOutcome::Cached);
        }
        if destination.exists() {
            debug!(
                "{} exists without {}; downloading again",
                destination.display(),
                marker.path().display()
            );
        }
        marker.clear()?;

        if let Some(parent) = destination.parent() {
            ensure_dir(parent)?;
        }

        info!("Downloading file {url}");
        let response = self.client.get(url)?;
        if !response.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let copy_err = |source: io::Error| Error::Download {
            url: url.to_string(),
            path: destination.to_path_buf(),
            source,
        };

        let file = File::create(destination).map_err(copy_err)?;
        let mut writer = BufWriter::new(file);
        let mut reader = VerifiedReader::new(response.body, Sha256Hasher::new());
        io::copy(&mut reader, &mut writer).map_err(copy_err)?;
        writer.flush().map_err(copy_err)?;
        let file = writer.into_inner().map_err(|e| copy_err(e.into_error()))?;
        file.sync_all().map_err(copy_err)?;
        drop(file);

        let bytes = reader.bytes_read();
        reader
            .finish(expected)
            .map_err(|source| Error::IntegrityMismatch {
                url: url.to_string(),
                path: destination.to_path_buf(),
                source,
            })?;

        marker.set()?;
        debug!("successfully downloaded {url} ({bytes} bytes) with sha256 {expected}");
        Ok(FetchOutcome::Downloaded { bytes })
    }
}
