//! Splitting a payload into contiguous byte ranges, one per connection.

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range in the inclusive `start-last` form libcurl expects.
    pub fn curl_range(&self) -> String {
        format!("{}-{}", self.start, self.end.saturating_sub(1))
    }
}

/// Splits `total` bytes into at most `connections` nearly equal ranges.
///
/// Earlier ranges take the remainder, one byte each. Never yields empty ranges, so a
/// payload smaller than the connection count gets one range per byte.
pub fn split_ranges(total: u64, connections: usize) -> Vec<ByteRange> {
    if total == 0 || connections == 0 {
        return Vec::new();
    }
    let parts = (connections as u64).min(total);
    let base = total / parts;
    let remainder = total % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = 0u64;
    for i in 0..parts {
        let len = base + u64::from(i < remainder);
        ranges.push(ByteRange {
            start,
            end: start + len,
        });
        start += len;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split() {
        let r = split_ranges(1000, 4);
        assert_eq!(
            r,
            vec![
                ByteRange { start: 0, end: 250 },
                ByteRange { start: 250, end: 500 },
                ByteRange { start: 500, end: 750 },
                ByteRange { start: 750, end: 1000 },
            ]
        );
    }

    #[test]
    fn remainder_goes_to_leading_ranges() {
        let lens: Vec<u64> = split_ranges(10, 4).iter().map(ByteRange::len).collect();
        assert_eq!(lens, vec![3, 3, 2, 2]);
    }

    #[test]
    fn more_connections_than_bytes() {
        let r = split_ranges(3, 32);
        assert_eq!(r.len(), 3);
        assert!(r.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(split_ranges(0, 4).is_empty());
        assert!(split_ranges(100, 0).is_empty());
    }

    #[test]
    fn curl_range_is_inclusive() {
        assert_eq!(ByteRange { start: 0, end: 99 }.curl_range(), "0-98");
        assert_eq!(ByteRange { start: 42, end: 43 }.curl_range(), "42-42");
    }
}
