use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::sync::Mutex;

use crate::error::Result;

/// Status line and streaming body of a GET.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP client abstraction.
///
/// Implementations follow redirects and map transport failures to
/// [`crate::Error::Transport`]. Non-2xx statuses are returned, not mapped,
/// so callers decide what a failure means.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        (**self).get(url)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;
    use crate::Error;

    /// Production HTTP client using `reqwest::blocking`.
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        /// Toolchain archives are large, so only the connect phase is bounded.
        pub fn new() -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .connect_timeout(Duration::from_secs(30))
                .timeout(None::<Duration>)
                .user_agent(concat!("rungo/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| Error::Client(Box::new(e)))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        fn get(&self, url: &str) -> Result<HttpResponse> {
            let response = self.client.get(url).send().map_err(|e| Error::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;
            Ok(HttpResponse {
                status: response.status().as_u16(),
                body: Box::new(response),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;

#[derive(Clone)]
struct MockRoute {
    status: u16,
    body: Vec<u8>,
    fail_after: Option<usize>,
}

/// In-memory client serving canned responses and recording every request.
///
/// Unrouted URLs answer 404.
#[derive(Default)]
pub struct MockHttpClient {
    routes: Mutex<HashMap<String, MockRoute>>,
    requests: Mutex<Vec<String>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) {
        self.insert(url.into(), MockRoute {
            status,
            body: body.into(),
            fail_after: None,
        });
    }

    /// Serve `body` with status 200 but drop the connection after
    /// `fail_after` bytes.
    pub fn route_truncated(&self, url: impl Into<String>, body: impl Into<Vec<u8>>, fail_after: usize) {
        self.insert(url.into(), MockRoute {
            status: 200,
            body: body.into(),
            fail_after: Some(fail_after),
        });
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn insert(&self, url: String, route: MockRoute) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert(url, route);
        }
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        let route = self
            .routes
            .lock()
            .ok()
            .and_then(|routes| routes.get(url).cloned());

        let Some(route) = route else {
            return Ok(HttpResponse {
                status: 404,
                body: Box::new(io::empty()),
            });
        };

        let body: Box<dyn Read + Send> = match route.fail_after {
            Some(limit) => Box::new(DroppedConnection {
                inner: Cursor::new(route.body),
                remaining: limit,
            }),
            None => Box::new(Cursor::new(route.body)),
        };
        Ok(HttpResponse {
            status: route.status,
            body,
        })
    }
}

struct DroppedConnection {
    inner: Cursor<Vec<u8>>,
    remaining: usize,
}

impl Read for DroppedConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ));
        }
        let len = buf.len().min(self.remaining);
        let n = self.inner.read(&mut buf[..len])?;
        if n == 0 {
            return Ok(0);
        }
        self.remaining -= n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_serves_routes_and_records() {
        let client = MockHttpClient::new();
        client.route("http://x/a", 200, b"abc".to_vec());

        let mut response = client.get("http://x/a").unwrap();
        assert!(response.is_success());
        let mut body = String::new();
        response.body.read_to_string(&mut body).unwrap();
        assert_eq!(body, "abc");

        let missing = client.get("http://x/b").unwrap();
        assert_eq!(missing.status, 404);
        assert!(!missing.is_success());

        assert_eq!(client.requests(), vec!["http://x/a", "http://x/b"]);
    }

    #[test]
    fn test_truncated_route_errors_mid_body() {
        let client = MockHttpClient::new();
        client.route_truncated("http://x/a", vec![7u8; 100], 10);

        let mut response = client.get("http://x/a").unwrap();
        let mut body = Vec::new();
        let err = response.body.read_to_end(&mut body).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(body.len(), 10);
    }
}
