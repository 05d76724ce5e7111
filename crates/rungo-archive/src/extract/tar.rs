use std::io::Read;

use rungo_platform::ArchiveFormat;

use crate::entry::{EntryKind, EntrySource, PendingEntry};
use crate::error::Error;
use crate::Result;

/// Entries of a tar stream, usually wrapped around a gzip decoder.
pub struct TarSource<'a, R: 'a + Read> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: Read + 'a> TarSource<'a, R> {
    pub fn new(archive: &'a mut tar::Archive<R>) -> Result<Self> {
        let entries = archive.entries().map_err(Error::Corrupted)?;
        Ok(Self { entries })
    }
}

impl<'a, R: Read + 'a> EntrySource for TarSource<'a, R> {
    // Tar entries borrow the archive for 'a, not the source itself.
    type Reader<'b>
        = tar::Entry<'a, R>
    where
        Self: 'b;

    fn next_entry(&mut self) -> Option<Result<PendingEntry<Self::Reader<'_>>>> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(Error::Corrupted(e))),
        };

        let path = match entry.path() {
            Ok(p) => p.into_owned(),
            Err(e) => return Some(Err(Error::InvalidPath(e.to_string()))),
        };

        let header = entry.header();
        let mode = header.mode().ok();
        let entry_type = header.entry_type();

        let kind = if entry_type.is_dir() {
            EntryKind::Directory
        } else if entry_type.is_file() {
            EntryKind::File(entry)
        } else {
            EntryKind::Other
        };

        Some(Ok(PendingEntry { path, mode, kind }))
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::TarGz
    }
}
