use url::Url;

use crate::{Arch, Error, Os, Result};

pub const DEFAULT_DOWNLOAD_BASE: &str = "https://dl.google.com/go";

/// Container format of a Go release archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Zip,
}

impl ArchiveFormat {
    /// Go ships `.zip` archives for Windows and `.tar.gz` everywhere else.
    pub fn for_os(os: Os) -> Self {
        match os {
            Os::Windows => ArchiveFormat::Zip,
            _ => ArchiveFormat::TarGz,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }
}

/// One downloadable Go distribution: version plus target platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    version: String,
    os: Os,
    arch: Arch,
}

impl Artifact {
    pub fn new(version: impl Into<String>, os: Os, arch: Arch) -> Self {
        Self {
            version: version.into(),
            os,
            arch,
        }
    }

    pub fn format(&self) -> ArchiveFormat {
        ArchiveFormat::for_os(self.os)
    }

    /// `go1.22.5.linux-amd64.tar.gz`
    pub fn archive_name(&self) -> String {
        format!(
            "go{}.{}-{}.{}",
            self.version,
            self.os,
            self.arch,
            self.format().extension()
        )
    }

    pub fn url(&self, base: &str) -> Result<Url> {
        let raw = format!("{}/{}", base.trim_end_matches('/'), self.archive_name());
        Url::parse(&raw).map_err(|source| Error::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })
    }

    /// The digest published next to the archive.
    pub fn checksum_url(&self, base: &str) -> Result<Url> {
        let url = self.url(base)?;
        let raw = format!("{url}.sha256");
        Url::parse(&raw).map_err(|source| Error::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })
    }
}

/// Final path segment of `url`, used as the local archive name.
pub fn file_name_from_url(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::NoFileName(url.to_string()))
}
