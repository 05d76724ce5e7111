use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result, VersionRequest};

pub const VERSION_FILE: &str = ".go-version";

/// Where a resolved version came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    Env,
    File(PathBuf),
    Default,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::Env => f.write_str("environment"),
            VersionSource::File(path) => write!(f, "{}", path.display()),
            VersionSource::Default => f.write_str("built-in default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub request: VersionRequest,
    pub source: VersionSource,
}

#[derive(Debug, Clone)]
pub struct VersionResolver {
    file_name: String,
    default: Option<String>,
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new(VERSION_FILE)
    }
}

impl VersionResolver {
    /// A resolver without a default: if nothing is found, resolution fails.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, version: impl Into<String>) -> Self {
        self.default = Some(version.into());
        self
    }

    /// Resolve using `env_override` first, then version files above `cwd`,
    /// then the default. Blank values count as absent at every level.
    pub fn resolve(&self, env_override: Option<&str>, cwd: &Path) -> Result<Resolved> {
        if let Some(raw) = env_override.map(str::trim).filter(|v| !v.is_empty()) {
            return Ok(Resolved {
                request: VersionRequest::parse(raw, "environment")?,
                source: VersionSource::Env,
            });
        }

        if let Some((path, raw)) = self.find_version_file(cwd) {
            debug!("using version specification from {}", path.display());
            let request = VersionRequest::parse(&raw, &path.display().to_string())?;
            return Ok(Resolved {
                request,
                source: VersionSource::File(path),
            });
        }

        match &self.default {
            Some(raw) => Ok(Resolved {
                request: VersionRequest::parse(raw, "built-in default")?,
                source: VersionSource::Default,
            }),
            None => Err(Error::NoVersion {
                file_name: self.file_name.clone(),
            }),
        }
    }

    /// Walk from `start` up to the filesystem root, returning the first
    /// version file whose first line is non-blank.
    ///
    /// Only the first line is consulted: a file starting with a blank line
    /// is skipped even if a version follows on a later line.
    pub fn find_version_file(&self, start: &Path) -> Option<(PathBuf, String)> {
        let mut dir = start;
        loop {
            let candidate = dir.join(&self.file_name);
            match read_first_line(&candidate) {
                Ok(Some(line)) => return Some((candidate, line)),
                Ok(None) => {}
                Err(e) => debug!("skipping {}: {e}", candidate.display()),
            }

            match dir.parent() {
                Some(parent) if parent != dir => dir = parent,
                _ => break,
            }
        }
        debug!(
            "couldn't find any `{}` file in tree {}",
            self.file_name,
            start.display()
        );
        None
    }
}

/// First line of `path`, trimmed. `Ok(None)` if the file is missing or the
/// line is blank.
pub fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if !file.metadata()?.is_file() {
        return Ok(None);
    }

    let mut line = String::new();
    BufReader::new(file).read_line(&mut line)?;
    let line = line.trim();
    Ok((!line.is_empty()).then(|| line.to_string()))
}
