use sha2::Digest;

use crate::Sha256Digest;

/// Incremental hash over bytes fed in arbitrary chunks.
pub trait Hasher {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Sha256Digest;
}

#[derive(Clone, Default)]
pub struct Sha256Hasher {
    state: sha2::Sha256,
}

impl Sha256Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    fn finalize(self) -> Sha256Digest {
        Sha256Digest::from_bytes(self.state.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunked_updates_match_one_shot() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"");
        hasher.update(b"world");

        assert_eq!(
            hasher.finalize().to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
