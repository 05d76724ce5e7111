//! The acquisition pipeline: digest, verified download, one-time extraction,
//! then an [`Invocation`] bound to the result.
//!
//! Every stage is skipped when its marker is on disk, so re-running after a
//! crash picks up at the first incomplete stage.

use std::ffi::OsString;

use rungo_archive::{ExtractOutcome, extract_once};
use rungo_fetch::{FetchOutcome, Fetcher, HttpClient};
use rungo_fs::ensure_dir;
use rungo_platform::Artifact;
use rungo_shim::{GoRootResolver, Invocation, PathResolver, ToolchainEnv};
use rungo_version::VersionRequest;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::layout::{InstallLayout, InstallState};

/// A toolchain ready to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toolchain {
    Managed(InstallLayout),
    /// Whatever `go` is on the host `PATH`.
    System,
}

impl Toolchain {
    pub fn layout(&self) -> Result<&InstallLayout> {
        match self {
            Toolchain::Managed(layout) => Ok(layout),
            Toolchain::System => Err(Error::SystemRoot),
        }
    }
}

pub struct Pipeline<C> {
    fetcher: Fetcher<C>,
    settings: Settings,
}

impl<C: HttpClient> Pipeline<C> {
    pub fn new(client: C, settings: Settings) -> Self {
        Self {
            fetcher: Fetcher::new(client),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where `version` for the configured platform lives.
    pub fn layout(&self, version: &str) -> Result<InstallLayout> {
        let artifact = Artifact::new(version, self.settings.os, self.settings.arch);
        InstallLayout::new(
            self.settings.install_root(version),
            artifact,
            &self.settings.download_base,
        )
    }

    pub fn prepare(&self, request: &VersionRequest) -> Result<Toolchain> {
        match request {
            VersionRequest::System => {
                debug!("using the host toolchain");
                Ok(Toolchain::System)
            }
            VersionRequest::Release(version) => self.install(version).map(Toolchain::Managed),
        }
    }

    /// Bring the installation root for `version` to [`InstallState::Ready`].
    pub fn install(&self, version: &str) -> Result<InstallLayout> {
        let layout = self.layout(version)?;
        let state = InstallState::probe(&layout);
        debug!("go {version} at {} is {state}", layout.root().display());
        if state == InstallState::Ready {
            return Ok(layout);
        }

        ensure_dir(layout.root())?;

        let digest = self
            .fetcher
            .sha256(layout.checksum_url().as_str(), &layout.checksum_path())?;

        let archive = layout.archive_path();
        match self.fetcher.download(
            layout.url().as_str(),
            &digest,
            &archive,
            &layout.download_marker(),
        )? {
            FetchOutcome::Cached => debug!("reusing verified {}", archive.display()),
            FetchOutcome::Downloaded { bytes } => {
                info!("Downloaded {} ({bytes} bytes)", archive.display())
            }
        }

        let outcome = extract_once(
            &archive,
            layout.artifact().format(),
            layout.root(),
            &layout.extract_marker(),
        )?;
        if let ExtractOutcome::Extracted(report) = outcome {
            debug!("extracted {} files from {}", report.files, archive.display());
        }

        Ok(layout)
    }

    /// The process that runs `binary` from `toolchain` with `args`.
    pub fn invocation<I>(&self, toolchain: &Toolchain, binary: &str, args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = OsString>,
    {
        let invocation = match toolchain {
            Toolchain::Managed(layout) => {
                let vars = ToolchainEnv::new(layout.root()).vars_from_env()?;
                Invocation::resolve(&GoRootResolver::new(layout.root()), binary)?.envs(vars)
            }
            Toolchain::System => Invocation::resolve(&PathResolver::new(), binary)?,
        };
        Ok(invocation.args(args))
    }
}
