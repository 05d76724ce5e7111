//! Extraction loop shared by every archive format.
//!
//! # Platform Behavior
//!
//! **Unix**: file and directory mode bits recorded in the archive are applied.
//! **Windows**: modes are ignored.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use rungo_fs::{Marker, ensure_dir};
use rungo_platform::ArchiveFormat;
use tracing::{debug, info};

use crate::entry::{EntryKind, EntrySource, ExtractReport};
use crate::error::{Error, Result};
use crate::sanitize::sanitize_entry_path;

mod tar;
mod zip;

pub use self::tar::TarSource;
pub use self::zip::ZipSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    AlreadyExtracted,
    Extracted(ExtractReport),
}

/// Unpack `archive` into `root` unless `marker` says it already happened.
///
/// The marker is written only after every entry was consumed. A failure
/// leaves whatever was written so far, unmarked, and the next call
/// re-extracts over it.
pub fn extract_once(
    archive: &Path,
    format: ArchiveFormat,
    root: &Path,
    marker: &Marker,
) -> Result<ExtractOutcome> {
    if marker.exists() {
        debug!(
            "skipping extraction due to presence of marker at {}",
            marker.path().display()
        );
        return Ok(ExtractOutcome::AlreadyExtracted);
    }
    marker.clear()?;
    ensure_dir(root)?;

    info!("Extracting {}", archive.display());
    let report = extract_archive(archive, format, root)?;
    marker.set()?;

    info!("Successfully extracted {}", archive.display());
    debug!(
        "wrote {} files and {} directories ({} bytes) to {}",
        report.files,
        report.directories,
        report.total_bytes,
        root.display()
    );
    Ok(ExtractOutcome::Extracted(report))
}

/// Unpack `archive` into `root` with the strategy for `format`. No markers.
pub fn extract_archive(archive: &Path, format: ArchiveFormat, root: &Path) -> Result<ExtractReport> {
    let file = File::open(archive).map_err(|source| Error::Open {
        path: archive.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    match format {
        ArchiveFormat::TarGz => {
            let mut archive = ::tar::Archive::new(GzDecoder::new(reader));
            let mut source = TarSource::new(&mut archive)?;
            extract_entries(&mut source, root)
        }
        ArchiveFormat::Zip => {
            let mut source = ZipSource::new(reader)?;
            extract_entries(&mut source, root)
        }
    }
}

/// Drain `source` into `root`.
///
/// Files get their parent directories created on demand, since archives are
/// not required to list a directory before its contents. Directory modes are
/// applied after the last entry so a read-only directory cannot block writes
/// into it.
pub fn extract_entries<S: EntrySource>(source: &mut S, root: &Path) -> Result<ExtractReport> {
    let mut report = ExtractReport::new(source.format());
    let mut directory_modes: Vec<(PathBuf, u32)> = Vec::new();

    while let Some(pending) = source.next_entry() {
        let pending = pending?;
        let relative = sanitize_entry_path(&pending.path)?;
        let target = root.join(&relative);

        match pending.kind {
            EntryKind::Directory => {
                create_dir(&target)?;
                if let Some(mode) = pending.mode {
                    directory_modes.push((target, mode));
                }
                report.directories += 1;
            }
            EntryKind::File(mut reader) => {
                if relative.as_os_str().is_empty() {
                    return Err(Error::InvalidPath(pending.path.display().to_string()));
                }
                report.total_bytes += write_file(&mut reader, &target, pending.mode)?;
                report.files += 1;
            }
            EntryKind::Other => {
                debug!("skipping unsupported entry {}", pending.path.display());
                report.skipped += 1;
            }
        }
    }

    for (path, mode) in directory_modes.iter().rev() {
        apply_mode(path, Some(*mode))?;
    }

    Ok(report)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file<R: Read + ?Sized>(reader: &mut R, target: &Path, mode: Option<u32>) -> Result<u64> {
    if let Some(parent) = target.parent() {
        create_dir(parent)?;
    }

    let failed = |source: io::Error| Error::ExtractionFailed {
        path: target.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode & 0o7777);
    }

    let mut file = options.open(target).map_err(failed)?;
    let written = io::copy(reader, &mut file).map_err(failed)?;
    drop(file);

    // `mode` on open only applies to newly created files.
    apply_mode(target, mode)?;
    Ok(written)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777)).map_err(|source| {
            Error::ExtractionFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
