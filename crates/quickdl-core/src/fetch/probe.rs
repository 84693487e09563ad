//! HEAD probe: payload length and range support.

use std::str;

/// What the server told us about the resource before the transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// `Content-Length`, when present and numeric.
    pub content_length: Option<u64>,
    /// Server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

/// Parses raw header lines. After redirects only the last response's headers count.
pub(crate) fn parse_headers<S: AsRef<str>>(lines: &[S]) -> ProbeResult {
    let mut result = ProbeResult::default();
    for line in lines {
        let line = line.as_ref().trim();
        if line.starts_with("HTTP/") {
            result = ProbeResult::default();
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.eq_ignore_ascii_case("content-length") {
            result.content_length = value.parse().ok();
        } else if name.eq_ignore_ascii_case("accept-ranges") {
            result.accept_ranges = value.eq_ignore_ascii_case("bytes");
        }
    }
    result
}

/// Collects header lines from a curl header callback.
pub(crate) fn push_header_line(lines: &mut Vec<String>, data: &[u8]) {
    if let Ok(s) = str::from_utf8(data) {
        let s = s.trim_end();
        if !s.is_empty() {
            lines.push(s.to_string());
        }
    }
}
