//! Blocking HTTP downloading with streaming verification.
//!
//! - [`fetch_sha256`] obtains the expected digest, from a local cache file
//!   when one is present, otherwise from the network.
//! - [`Fetcher::download`] streams an archive to disk while hashing it and
//!   only sets the download marker once the digest matches.
//!
//! The network sits behind [`HttpClient`]; [`ReqwestClient`] is the
//! production implementation and [`MockHttpClient`] serves canned responses.

mod checksum;
mod error;
mod fetcher;
mod http;

pub use checksum::fetch_sha256;
pub use error::{Error, Result};
pub use fetcher::{FetchOutcome, Fetcher};
pub use http::{HttpClient, HttpResponse, MockHttpClient};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
