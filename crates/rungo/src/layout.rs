//! On-disk layout of one installation root and the state it is in.
//!
//! ```text
//! <root>/
//!   go1.22.5.linux-amd64.tar.gz          archive
//!   go1.22.5.linux-amd64.tar.gz.sha256   expected digest
//!   go-downloaded                        archive verified
//!   go-extracted                         tree complete
//!   go/                                  GOROOT
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use rungo_fs::Marker;
use rungo_platform::{Artifact, file_name_from_url};
use url::Url;

use crate::error::Result;

pub const DOWNLOAD_MARKER: &str = "go-downloaded";
pub const EXTRACT_MARKER: &str = "go-extracted";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
    artifact: Artifact,
    url: Url,
    checksum_url: Url,
    archive_name: String,
}

impl InstallLayout {
    pub fn new(root: impl Into<PathBuf>, artifact: Artifact, download_base: &str) -> Result<Self> {
        let url = artifact.url(download_base)?;
        let checksum_url = artifact.checksum_url(download_base)?;
        let archive_name = file_name_from_url(&url)?;
        Ok(Self {
            root: root.into(),
            artifact,
            url,
            checksum_url,
            archive_name,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn checksum_url(&self) -> &Url {
        &self.checksum_url
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(&self.archive_name)
    }

    pub fn checksum_path(&self) -> PathBuf {
        self.root.join(format!("{}.sha256", self.archive_name))
    }

    pub fn download_marker(&self) -> Marker {
        Marker::new(&self.root, DOWNLOAD_MARKER)
    }

    pub fn extract_marker(&self) -> Marker {
        Marker::new(&self.root, EXTRACT_MARKER)
    }

    pub fn goroot(&self) -> PathBuf {
        self.root.join("go")
    }
}

/// Progress of an installation root, read from what is on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallState {
    /// No archive yet.
    Absent,
    /// An archive without a download marker: interrupted or failed
    /// verification.
    Downloading,
    /// A verified archive, nothing extracted.
    Downloaded,
    /// A verified archive and a partial tree.
    Extracting,
    Ready,
}

impl InstallState {
    pub fn probe(layout: &InstallLayout) -> Self {
        if layout.extract_marker().exists() {
            return InstallState::Ready;
        }
        let archive = layout.archive_path();
        if !archive.exists() {
            return InstallState::Absent;
        }
        if !layout.download_marker().exists() {
            return InstallState::Downloading;
        }
        if layout.goroot().exists() {
            InstallState::Extracting
        } else {
            InstallState::Downloaded
        }
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallState::Absent => "absent",
            InstallState::Downloading => "partially downloaded",
            InstallState::Downloaded => "downloaded",
            InstallState::Extracting => "partially extracted",
            InstallState::Ready => "ready",
        };
        f.write_str(s)
    }
}
