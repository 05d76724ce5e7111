#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("invalid sha256 digest {0:?}: expected 64 hex characters")]
    InvalidDigest(String),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
