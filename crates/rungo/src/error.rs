use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Version(#[from] rungo_version::Error),

    #[error(transparent)]
    Platform(#[from] rungo_platform::Error),

    #[error(transparent)]
    Fetch(#[from] rungo_fetch::Error),

    #[error(transparent)]
    Archive(#[from] rungo_archive::Error),

    #[error(transparent)]
    Shim(#[from] rungo_shim::Error),

    #[error(transparent)]
    Fs(#[from] rungo_fs::Error),

    #[error("unsupported host platform {os}/{arch}; pass --goos and --goarch")]
    UnsupportedHost {
        os: &'static str,
        arch: &'static str,
    },

    #[error("the host toolchain has no managed installation root")]
    SystemRoot,
}

pub type Result<T> = std::result::Result<T, Error>;
