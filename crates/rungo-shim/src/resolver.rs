//! Mapping a command name to the binary that should run it.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Binaries shipped in a Go distribution's `bin` directory.
pub const TOOLCHAIN_BINARIES: &[&str] = &["go", "gofmt"];

/// Binary run when the wrapper is not invoked under a toolchain name.
pub const DEFAULT_BINARY: &str = "go";

pub trait TargetResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf>;
}

/// The toolchain name `argv0` refers to, if any.
///
/// Only the file stem is compared, so `/usr/local/bin/gofmt` and `go.exe`
/// both match.
pub fn invoked_as(argv0: &OsStr) -> Option<&'static str> {
    let stem = Path::new(argv0).file_stem()?.to_str()?;
    TOOLCHAIN_BINARIES
        .iter()
        .copied()
        .find(|name| *name == stem)
}

/// Binary to delegate to for a process started as `argv0`.
pub fn select_binary(argv0: &OsStr) -> &'static str {
    invoked_as(argv0).unwrap_or(DEFAULT_BINARY)
}

/// Resolves commands inside an extracted toolchain at `<root>/go/bin`.
///
/// The candidate path is returned whether or not it exists; the delegator
/// reports a missing binary.
#[derive(Debug, Clone)]
pub struct GoRootResolver {
    bin_dir: PathBuf,
}

impl GoRootResolver {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            bin_dir: root.as_ref().join("go").join("bin"),
        }
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }
}

impl TargetResolver for GoRootResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        Some(
            self.bin_dir
                .join(format!("{command}{}", env::consts::EXE_SUFFIX)),
        )
    }
}

/// Resolves commands on a search path, as the shell would.
///
/// Used for the host toolchain. Entries that are the wrapper itself are
/// skipped so a `go` symlink to this binary cannot resolve to itself.
#[derive(Debug, Clone)]
pub struct PathResolver {
    search_path: Option<OsString>,
    cwd: PathBuf,
    skip: Option<PathBuf>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    /// Searches the process `PATH`, skipping the running executable.
    pub fn new() -> Self {
        Self {
            search_path: env::var_os("PATH"),
            cwd: env::current_dir().unwrap_or_default(),
            skip: env::current_exe().ok().and_then(|exe| exe.canonicalize().ok()),
        }
    }

    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn skipping(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.skip = Some(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()));
        self
    }

    fn is_skipped(&self, candidate: &Path) -> bool {
        let Some(skip) = &self.skip else {
            return false;
        };
        candidate
            .canonicalize()
            .map(|resolved| &resolved == skip)
            .unwrap_or(false)
    }
}

impl TargetResolver for PathResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        let candidates =
            match which::which_in_all(command, self.search_path.as_ref(), &self.cwd) {
                Ok(candidates) => candidates,
                Err(e) => {
                    debug!("lookup of '{command}' on PATH failed: {e}");
                    return None;
                }
            };
        for candidate in candidates {
            if self.is_skipped(&candidate) {
                debug!("skipping {} (this executable)", candidate.display());
                continue;
            }
            return Some(candidate);
        }
        None
    }
}
