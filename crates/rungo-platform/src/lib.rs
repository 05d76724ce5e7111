pub use self::arch::Arch;
pub use self::artifact::{ArchiveFormat, Artifact, DEFAULT_DOWNLOAD_BASE, file_name_from_url};
pub use self::error::{Error, Result};
pub use self::os::Os;

pub mod arch;
mod artifact;
pub mod dir;
mod error;
pub mod os;
