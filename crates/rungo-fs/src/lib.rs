//! Filesystem primitives for rungo install roots.
//!
//! Two pieces live here:
//!
//! - [`Marker`]: zero-byte sentinel files whose presence records that a stage
//!   (download, extraction) finished. Absence always means "run the stage".
//! - [`atomic_write`]: write-to-temp-then-rename, so a reader never observes a
//!   half-written file.

pub use self::atomic_write::{AtomicWriteOptions, atomic_write, ensure_dir};
pub use self::error::{Error, Result};
pub use self::marker::Marker;

mod atomic_write;
mod error;
mod marker;
