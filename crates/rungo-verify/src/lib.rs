//! Content verification for downloaded archives.
//!
//! Bytes are hashed while they stream from the network into the destination
//! file, so an archive is read exactly once.
//!
//! # Example
//!
//! ```
//! use std::io;
//! use rungo_verify::{Sha256Digest, Sha256Hasher, VerifiedReader};
//!
//! let expected = Sha256Digest::of(b"hello world");
//!
//! let mut reader = VerifiedReader::new(&b"hello world"[..], Sha256Hasher::new());
//! let mut sink = Vec::new();
//! io::copy(&mut reader, &mut sink).unwrap();
//!
//! reader.finish(&expected).unwrap();
//! ```

pub use self::digest::{SHA256_HEX_LEN, Sha256Digest};
pub use self::error::{Result, VerifyError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod digest;
mod error;
mod hasher;
mod reader;
