use std::path::PathBuf;

use crate::{Error, Result};

/// Directory under the user's home that holds one root per Go version.
pub const DEFAULT_HOME_INSTALL_DIR: &str = ".go";

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// `~/.go`, the default parent of every installation root.
pub fn default_install_base() -> Result<PathBuf> {
    user_home()
        .map(|home| home.join(DEFAULT_HOME_INSTALL_DIR))
        .ok_or(Error::NoHome)
}
