//! `rungo` runs the Go toolchain a project asks for.
//!
//! The requested version comes from `GO_VERSION`, the nearest `.go-version`
//! file or a built-in default. The matching release archive is downloaded
//! once, verified against its published SHA-256, extracted once under
//! `~/.go/<version>` and then the requested binary is run with `GOROOT`
//! pointing at it.

pub mod cli;
pub mod config;
mod error;
pub mod layout;
pub mod logging;
pub mod pipeline;

pub use self::error::{Error, Result};
pub use self::layout::{DOWNLOAD_MARKER, EXTRACT_MARKER, InstallLayout, InstallState};
pub use self::pipeline::{Pipeline, Toolchain};
