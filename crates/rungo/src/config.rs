use std::env;
use std::path::{Path, PathBuf};

use rungo_platform::{Arch, Os, dir::default_install_base};
use rungo_version::{Resolved, VersionResolver};

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Go version used when neither `GO_VERSION` nor a `.go-version` file names one.
pub const DEFAULT_GO_VERSION: &str = "1.22.5";

/// Everything an invocation needs, merged from flags, environment and
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub os: Os,
    pub arch: Arch,
    /// Parent of every per-version installation root.
    pub install_base: PathBuf,
    pub download_base: String,
    pub go_version: Option<String>,
    pub verbose: bool,
    pub print_root: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let os = match cli.goos {
            Some(os) => os,
            None => host_os()?,
        };
        let arch = match cli.goarch {
            Some(arch) => arch,
            None => host_arch()?,
        };
        let install_base = match &cli.root {
            Some(root) => root.clone(),
            None => default_install_base()?,
        };

        Ok(Self {
            os,
            arch,
            install_base,
            download_base: cli.download_base.clone(),
            go_version: cli.go_version.clone(),
            verbose: cli.verbose,
            print_root: cli.print_root,
        })
    }

    /// `<install_base>/<version>` for the host platform. Any other target gets
    /// its own `<install_base>/<version>/<os>-<arch>` so markers never cover
    /// another platform's tree.
    pub fn install_root(&self, version: &str) -> PathBuf {
        let root = self.install_base.join(version);
        if self.targets_host() {
            root
        } else {
            root.join(format!("{}-{}", self.os, self.arch))
        }
    }

    pub fn targets_host(&self) -> bool {
        Os::current() == Some(self.os) && Arch::current() == Some(self.arch)
    }

    /// Resolve the requested version starting from `cwd`.
    pub fn resolve_version_in(&self, cwd: &Path) -> Result<Resolved> {
        Ok(VersionResolver::default()
            .with_default(DEFAULT_GO_VERSION)
            .resolve(self.go_version.as_deref(), cwd)?)
    }

    /// Resolve the requested version starting from the working directory.
    pub fn resolve_version(&self) -> Result<Resolved> {
        let cwd = env::current_dir().map_err(rungo_version::Error::CurrentDir)?;
        self.resolve_version_in(&cwd)
    }
}

fn host_os() -> Result<Os> {
    Os::current().ok_or(Error::UnsupportedHost {
        os: env::consts::OS,
        arch: env::consts::ARCH,
    })
}

fn host_arch() -> Result<Arch> {
    Arch::current().ok_or(Error::UnsupportedHost {
        os: env::consts::OS,
        arch: env::consts::ARCH,
    })
}
