//! Streaming extraction of Go release archives.
//!
//! # Architecture
//!
//! - `entry.rs` - the [`EntrySource`] contract shared by every format
//! - `extract/` - the extraction loop plus the tar.gz and zip sources
//! - `sanitize.rs` - entry path validation
//!
//! [`extract_once`] wraps the loop with the `go-extracted` completion marker.

pub use error::{Error, Result};
pub use entry::{EntryKind, EntrySource, ExtractReport, PendingEntry};
pub use extract::{ExtractOutcome, TarSource, ZipSource, extract_archive, extract_entries, extract_once};
pub use rungo_platform::ArchiveFormat;

mod entry;
mod error;
mod extract;
mod sanitize;
