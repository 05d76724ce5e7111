use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result};

/// Zero-byte sentinel file recording that a stage completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the marker, including its directory.
    pub fn set(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            crate::ensure_dir(parent)?;
        }
        fs::write(&self.path, b"").map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("set marker {}", self.path.display());
        Ok(())
    }

    /// Remove the marker. A marker that is already gone is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("cleared marker {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
