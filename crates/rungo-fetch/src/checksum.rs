use std::fs;
use std::io::Read;
use std::path::Path;

use rungo_fs::{AtomicWriteOptions, atomic_write};
use rungo_verify::{SHA256_HEX_LEN, Sha256Digest};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::http::HttpClient;

/// Return the expected SHA-256 for an artifact, downloading it if necessary.
///
/// A cache file holding exactly one hex digest is trusted as-is: published
/// digests never change for a released archive. Anything else in the cache is
/// ignored and replaced by a fresh copy from `url`.
pub fn fetch_sha256<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    cache_path: &Path,
) -> Result<Sha256Digest> {
    if let Some(digest) = read_cached(cache_path) {
        debug!("using cached sha256 {digest} from {}", cache_path.display());
        return Ok(digest);
    }

    info!("Downloading sha256 file {url}");
    let response = client.get(url)?;
    if !response.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    // The published file may carry a trailing newline or file name.
    let mut head = Vec::with_capacity(SHA256_HEX_LEN);
    response
        .body
        .take(SHA256_HEX_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|source| Error::Body {
            url: url.to_string(),
            source,
        })?;
    if head.len() < SHA256_HEX_LEN {
        return Err(Error::ShortBody {
            url: url.to_string(),
            expected: SHA256_HEX_LEN,
            actual: head.len(),
        });
    }

    let text = String::from_utf8_lossy(&head);
    let digest = Sha256Digest::from_hex(&text).map_err(|source| Error::MalformedChecksum {
        url: url.to_string(),
        source,
    })?;

    // Synced like the archive, so a surviving rename never exposes an empty cache.
    atomic_write(
        cache_path,
        digest.to_hex().as_bytes(),
        AtomicWriteOptions::new().sync(true),
    )?;
    debug!("saved sha256 {digest} to {}", cache_path.display());
    Ok(digest)
}

fn read_cached(path: &Path) -> Option<Sha256Digest> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("no usable sha256 cache at {}: {e}", path.display());
            return None;
        }
    };
    let trimmed = content.trim();
    if trimmed.len() != SHA256_HEX_LEN {
        debug!(
            "ignoring sha256 cache at {}: {} bytes",
            path.display(),
            trimmed.len()
        );
        return None;
    }
    Sha256Digest::from_hex(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockHttpClient;
    use tempfile::tempdir;

    const URL: &str = "https://dl.example/go1.22.5.linux-amd64.tar.gz.sha256";

    fn digest() -> Sha256Digest {
        Sha256Digest::of(b"archive bytes")
    }

    #[test]
    fn test_fetches_and_caches() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("go.tar.gz.sha256");
        let client = MockHttpClient::new();
        client.route(URL, 200, digest().to_hex());

        assert_eq!(fetch_sha256(&client, URL, &cache).unwrap(), digest());
        assert_eq!(fs::read(&cache).unwrap(), digest().to_hex().as_bytes());

        // Second call is served from the cache.
        assert_eq!(fetch_sha256(&client, URL, &cache).unwrap(), digest());
        assert_eq!(client.request_count(), 1);
    }

    #[test]
    fn test_cached_digest_skips_network() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("go.tar.gz.sha256");
        fs::write(&cache, digest().to_hex()).unwrap();
        let client = MockHttpClient::new();

        assert_eq!(fetch_sha256(&client, URL, &cache).unwrap(), digest());
        assert_eq!(client.request_count(), 0);
    }

    #[test]
    fn test_truncated_cache_is_refetched() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("go.tar.gz.sha256");
        fs::write(&cache, &digest().to_hex()[..20]).unwrap();
        let client = MockHttpClient::new();
        client.route(URL, 200, digest().to_hex());

        assert_eq!(fetch_sha256(&client, URL, &cache).unwrap(), digest());
        assert_eq!(client.request_count(), 1);
        assert_eq!(fs::read_to_string(&cache).unwrap(), digest().to_hex());
    }

    #[test]
    fn test_trailing_content_is_tolerated() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("sha");
        let client = MockHttpClient::new();
        client.route(URL, 200, format!("{}  go1.22.5.linux-amd64.tar.gz\n", digest()));

        assert_eq!(fetch_sha256(&client, URL, &cache).unwrap(), digest());
        assert_eq!(fs::read(&cache).unwrap().len(), SHA256_HEX_LEN);
    }

    #[test]
    fn test_non_2xx_is_an_error() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("sha");
        let client = MockHttpClient::new();
        client.route(URL, 500, b"oops".to_vec());

        assert!(matches!(
            fetch_sha256(&client, URL, &cache),
            Err(Error::HttpStatus { status: 500, .. })
        ));
        assert!(!cache.exists());
    }

    #[test]
    fn test_short_body_is_an_error() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("sha");
        let client = MockHttpClient::new();
        client.route(URL, 200, &digest().to_hex()[..32]);

        assert!(matches!(
            fetch_sha256(&client, URL, &cache),
            Err(Error::ShortBody { actual: 32, .. })
        ));
        assert!(!cache.exists());
    }

    #[test]
    fn test_non_hex_body_is_an_error() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("sha");
        let client = MockHttpClient::new();
        client.route(URL, 200, "<html>".repeat(20));

        assert!(matches!(
            fetch_sha256(&client, URL, &cache),
            Err(Error::MalformedChecksum { .. })
        ));
        assert!(!cache.exists());
    }
}
