//! Selection of the Go version a `rungo` invocation operates on.
//!
//! Sources, highest priority first:
//!
//! 1. an explicit override (the `GO_VERSION` environment variable),
//! 2. the nearest `.go-version` file walking up from the working directory,
//! 3. the resolver's built-in default, if it has one.
//!
//! The literal `system` from any source selects the host's own toolchain.

pub use self::error::{Error, Result};
pub use self::resolve::{
    Resolved, VERSION_FILE, VersionResolver, VersionSource, read_first_line,
};
pub use self::version::{SYSTEM, VersionRequest};

mod error;
mod resolve;
mod version;
