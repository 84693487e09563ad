//! Tiny HTTP/1.1 server for fetch tests: HEAD and `Range: bytes=a-b` GET over one body.
//!
//! One request per connection; the connection is closed after the response.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ServerBehavior {
    /// HEAD answers 405 when false.
    pub head_allowed: bool,
    /// GET ignores `Range` and sends the whole body with 200 when false.
    pub honor_ranges: bool,
    /// Send `Accept-Ranges: bytes`, independent of `honor_ranges`.
    pub advertise_ranges: bool,
    /// Answer every request with this status and an empty body.
    pub fail_with: Option<u16>,
}

impl Default for ServerBehavior {
    fn default() -> Self {
        Self {
            head_allowed: true,
            honor_ranges: true,
            advertise_ranges: true,
            fail_with: None,
        }
    }
}

/// A running server. Lives until the test process exits.
pub struct RangeServer {
    pub url: String,
    ranged_gets: Arc<AtomicUsize>,
}

impl RangeServer {
    /// Number of GETs that carried a `Range` header.
    pub fn ranged_gets(&self) -> usize {
        self.ranged_gets.load(Ordering::SeqCst)
    }
}

pub fn start(body: Vec<u8>) -> RangeServer {
    start_with(body, ServerBehavior::default())
}

pub fn start_with(body: Vec<u8>, behavior: ServerBehavior) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let ranged_gets = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ranged_gets);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let counter = Arc::clone(&counter);
            thread::spawn(move || serve(stream, &body, behavior, &counter));
        }
    });
    RangeServer {
        url: format!("http://127.0.0.1:{port}/payload.bin"),
        ranged_gets,
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        206 => "Partial Content",
        404 => "Not Found",
        405 => "Method Not Allowed",
        416 => "Range Not Satisfiable",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn respond(stream: &mut TcpStream, status: u16, headers: &[String], body: &[u8]) {
    let mut head = format!("HTTP/1.1 {} {}\r\n", status, reason(status));
    for h in headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("Connection: close\r\n\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn serve(mut stream: TcpStream, body: &[u8], behavior: ServerBehavior, ranged_gets: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let (method, range) = parse_request(request);
    let total = body.len() as u64;

    if let Some(status) = behavior.fail_with {
        respond(&mut stream, status, &["Content-Length: 0".to_string()], &[]);
        return;
    }

    let mut headers = Vec::new();
    if behavior.advertise_ranges {
        headers.push("Accept-Ranges: bytes".to_string());
    }

    match method {
        "HEAD" if behavior.head_allowed => {
            headers.push(format!("Content-Length: {total}"));
            respond(&mut stream, 200, &headers, &[]);
        }
        "GET" => {
            if range.is_some() {
                ranged_gets.fetch_add(1, Ordering::SeqCst);
            }
            match range.filter(|_| behavior.honor_ranges) {
                Some((start, last)) => {
                    let last = last.min(total.saturating_sub(1));
                    if start > last || start >= total {
                        headers.push(format!("Content-Range: bytes */{total}"));
                        headers.push("Content-Length: 0".to_string());
                        respond(&mut stream, 416, &headers, &[]);
                        return;
                    }
                    let slice = &body[start as usize..=last as usize];
                    headers.push(format!("Content-Range: bytes {start}-{last}/{total}"));
                    headers.push(format!("Content-Length: {}", slice.len()));
                    respond(&mut stream, 206, &headers, slice);
                }
                None => {
                    headers.push(format!("Content-Length: {total}"));
                    respond(&mut stream, 200, &headers, body);
                }
            }
        }
        _ => respond(&mut stream, 405, &["Content-Length: 0".to_string()], &[]),
    }
}

/// Method and the `bytes=start-last` range, if any. An open-ended range runs to the end.
fn parse_request(request: &str) -> (&str, Option<(u64, u64)>) {
    let mut lines = request.lines();
    let method = lines
        .next()
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("");
    let mut range = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("range") {
            continue;
        }
        let Some(bounds) = value.trim().strip_prefix("bytes=") else {
            continue;
        };
        if let Some((a, b)) = bounds.split_once('-') {
            let start = a.trim().parse().unwrap_or(0);
            let last = match b.trim() {
                "" => u64::MAX,
                b => b.parse().unwrap_or(0),
            };
            range = Some((start, last));
        }
    }
    (method, range)
}
