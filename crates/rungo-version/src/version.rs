use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

/// Sentinel selecting the toolchain already installed on the host.
pub const SYSTEM: &str = "system";

// Release strings become a directory name and part of a download URL.
static RELEASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z][0-9A-Za-z._+-]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRequest {
    Release(String),
    System,
}

impl VersionRequest {
    /// Parse a trimmed, non-empty version string. `origin` names where it came
    /// from and only feeds the error message.
    pub fn parse(raw: &str, origin: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(SYSTEM) {
            return Ok(VersionRequest::System);
        }
        if !RELEASE_REGEX.is_match(raw) || raw.contains("..") {
            return Err(Error::InvalidVersion {
                version: raw.to_string(),
                origin: origin.to_string(),
            });
        }
        Ok(VersionRequest::Release(raw.to_string()))
    }

    pub fn release(&self) -> Option<&str> {
        match self {
            VersionRequest::Release(v) => Some(v),
            VersionRequest::System => None,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, VersionRequest::System)
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequest::Release(v) => f.write_str(v),
            VersionRequest::System => f.write_str(SYSTEM),
        }
    }
}
