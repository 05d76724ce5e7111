use std::io::{Read, Seek};

use rungo_platform::ArchiveFormat;

use crate::entry::{EntryKind, EntrySource, PendingEntry};
use crate::error::Error;
use crate::Result;

pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    index: usize,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        Ok(Self { archive, index: 0 })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    type Reader<'a>
        = Box<dyn Read + 'a>
    where
        Self: 'a;

    fn next_entry(&mut self) -> Option<Result<PendingEntry<Self::Reader<'_>>>> {
        if self.index >= self.archive.len() {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let file = match self.archive.by_index(index) {
            Ok(f) => f,
            Err(e) => return Some(Err(Error::Zip(e))),
        };

        let path = match file.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                return Some(Err(Error::PathEscape {
                    entry: file.name().into(),
                }));
            }
        };
        let mode = file.unix_mode();

        let kind = if file.is_dir() {
            EntryKind::Directory
        } else if file.is_file() {
            let reader: Box<dyn Read + '_> = Box::new(file);
            EntryKind::File(reader)
        } else {
            EntryKind::Other
        };

        Some(Ok(PendingEntry { path, mode, kind }))
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Zip
    }
}
