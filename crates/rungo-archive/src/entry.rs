use std::path::PathBuf;

use rungo_platform::ArchiveFormat;

use crate::Result;

/// What an archive entry turns into on disk.
pub enum EntryKind<R> {
    Directory,
    File(R),
    /// Symlinks, hard links, devices. Not materialized.
    Other,
}

/// An entry read from the archive but not yet written.
pub struct PendingEntry<R> {
    pub path: PathBuf,
    pub mode: Option<u32>,
    pub kind: EntryKind<R>,
}

/// Format-specific entry stream.
///
/// Entries are produced one at a time and each file entry borrows the
/// underlying decoder, so nothing is buffered beyond the copy buffer.
pub trait EntrySource {
    type Reader<'a>: std::io::Read
    where
        Self: 'a;

    fn next_entry(&mut self) -> Option<Result<PendingEntry<Self::Reader<'_>>>>;

    fn format(&self) -> ArchiveFormat;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub format: ArchiveFormat,
    pub files: usize,
    pub directories: usize,
    pub skipped: usize,
    pub total_bytes: u64,
}

impl ExtractReport {
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            files: 0,
            directories: 0,
            skipped: 0,
            total_bytes: 0,
        }
    }
}
