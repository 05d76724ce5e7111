use std::fmt;

use crate::{Hasher, Sha256Hasher, VerifyError};

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    /// Parse a 64-character hex digest. Case is ignored; nothing else is trimmed.
    pub fn from_hex(s: &str) -> Result<Self, VerifyError> {
        if s.len() != SHA256_HEX_LEN {
            return Err(VerifyError::InvalidDigest(s.to_string()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| VerifyError::InvalidDigest(s.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Lowercase hex form, as stored in `.sha256` cache files.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Digest({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_from_hex_accepts_uppercase() {
        let lower = Sha256Digest::from_hex(HELLO).unwrap();
        let upper = Sha256Digest::from_hex(&HELLO.to_uppercase()).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.to_hex(), HELLO);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Sha256Digest::from_hex(&HELLO[..63]).is_err());
        assert!(Sha256Digest::from_hex(&format!("{HELLO}\n")).is_err());
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let bad = format!("{}zz", &HELLO[..62]);
        assert!(matches!(
            Sha256Digest::from_hex(&bad),
            Err(VerifyError::InvalidDigest(_))
        ));
    }

    #[test]
    fn test_of_matches_known_value() {
        assert_eq!(Sha256Digest::of(b"hello world").to_string(), HELLO);
    }
}
