//! Fetching a remote resource over one or more connections.
//!
//! [`Fetcher`] is the seam the CLI talks to. [`CurlFetcher`] probes the resource with
//! HEAD; when the length is known, ranges are accepted and more than one connection is
//! allowed, it fetches contiguous ranges on scoped threads and joins them in order.
//! Otherwise it falls back to one plain GET. No retries, no resume.
//!
//! Everything here blocks; call from `spawn_blocking` in async code.

mod plan;
mod probe;

use std::time::Duration;

use url::Url;

pub use plan::{split_ranges, ByteRange};
pub use probe::ProbeResult;

/// Upper bound on parallel range requests for one fetch.
pub const MAX_CONNECTIONS: usize = 64;

/// Errors from fetching a resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid link {locator}: {reason}")]
    InvalidLocator { locator: String, reason: String },
    #[error(transparent)]
    Curl(#[from] curl::Error),
    #[error("{method} returned HTTP {code}")]
    Http { method: &'static str, code: u32 },
    /// A range came back with the wrong number of bytes (server ignored Range, or closed early).
    #[error("partial transfer for range {range}: expected {expected} bytes, got {received}")]
    Partial {
        range: String,
        expected: u64,
        received: u64,
    },
    #[error("range worker panicked")]
    WorkerPanicked,
}

/// Source of complete payloads.
pub trait Fetcher: Sync {
    /// Fetches `locator` using up to `connections` connections. `skip_tls` disables
    /// certificate and host name verification.
    fn fetch(&self, locator: &str, connections: usize, skip_tls: bool)
        -> Result<Vec<u8>, FetchError>;
}

/// Checks that `locator` is an absolute http(s) URL.
pub fn parse_locator(locator: &str) -> Result<Url, FetchError> {
    let url = Url::parse(locator).map_err(|e| FetchError::InvalidLocator {
        locator: locator.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidLocator {
            locator: locator.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Clamps a connection hint to `1..=MAX_CONNECTIONS`, warning when it had to change.
pub fn clamp_connections(requested: usize) -> usize {
    let clamped = requested.clamp(1, MAX_CONNECTIONS);
    if clamped != requested {
        tracing::warn!(requested, clamped, "connection count out of range, clamped");
    }
    clamped
}

/// libcurl-backed [`Fetcher`].
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        }
    }
}

impl CurlFetcher {
    fn easy(&self, url: &str, skip_tls: bool) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.ssl_verify_peer(!skip_tls)?;
        easy.ssl_verify_host(!skip_tls)?;
        Ok(easy)
    }

    /// HEAD request for length and range support.
    pub fn probe(&self, url: &str, skip_tls: bool) -> Result<ProbeResult, FetchError> {
        let mut lines = Vec::new();
        let mut easy = self.easy(url, skip_tls)?;
        easy.nobody(true)?;
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                probe::push_header_line(&mut lines, data);
                true
            })?;
            transfer.perform()?;
        }
        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                method: "HEAD",
                code,
            });
        }
        Ok(probe::parse_headers(&lines))
    }

    /// GET of the whole resource, or of one range.
    fn get(
        &self,
        url: &str,
        range: Option<ByteRange>,
        skip_tls: bool,
    ) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut easy = self.easy(url, skip_tls)?;
        if let Some(r) = range {
            easy.range(&r.curl_range())?;
            body.reserve(r.len() as usize);
        }
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http { method: "GET", code });
        }
        if let Some(r) = range {
            if body.len() as u64 != r.len() {
                return Err(FetchError::Partial {
                    range: r.curl_range(),
                    expected: r.len(),
                    received: body.len() as u64,
                });
            }
        }
        Ok(body)
    }

    fn get_ranges(
        &self,
        url: &str,
        ranges: &[ByteRange],
        skip_tls: bool,
    ) -> Result<Vec<u8>, FetchError> {
        let parts: Vec<Result<Vec<u8>, FetchError>> = std::thread::scope(|s| {
            let handles: Vec<_> = ranges
                .iter()
                .map(|r| s.spawn(move || self.get(url, Some(*r), skip_tls)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(Err(FetchError::WorkerPanicked)))
                .collect()
        });

        let total = ranges.iter().map(ByteRange::len).sum::<u64>() as usize;
        let mut payload = Vec::with_capacity(total);
        for part in parts {
            payload.extend_from_slice(&part?);
        }
        Ok(payload)
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(
        &self,
        locator: &str,
        connections: usize,
        skip_tls: bool,
    ) -> Result<Vec<u8>, FetchError> {
        let url = parse_locator(locator)?;
        let url = url.as_str();
        let connections = clamp_connections(connections);

        let probe = match self.probe(url, skip_tls) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!("HEAD probe failed, falling back to single GET: {}", e);
                ProbeResult::default()
            }
        };
        let ranges = match probe.content_length {
            Some(len) if probe.accept_ranges && connections > 1 => split_ranges(len, connections),
            _ => Vec::new(),
        };
        tracing::debug!(
            url,
            content_length = ?probe.content_length,
            accept_ranges = probe.accept_ranges,
            ranges = ranges.len(),
            "fetch plan"
        );

        if ranges.len() > 1 {
            self.get_ranges(url, &ranges, skip_tls)
        } else {
            self.get(url, None, skip_tls)
        }
    }
}
