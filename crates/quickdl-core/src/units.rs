//! Binary size units for progress display and chunked writes.

const UNITS: [(&str, u64); 5] = [
    ("B", 1),
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
    ("TiB", 1 << 40),
];

/// Picks the largest unit in which `bytes` is at least one, and the scaled value.
///
/// Zero bytes is reported in `B`.
pub fn select_unit(bytes: u64) -> (f64, &'static str) {
    let (label, divisor) = UNITS
        .iter()
        .rev()
        .find(|(_, divisor)| bytes >= *divisor)
        .copied()
        .unwrap_or(UNITS[0]);
    (bytes as f64 / divisor as f64, label)
}

/// Bytes per unit for a label returned by [`select_unit`].
pub fn unit_divisor(label: &str) -> Option<u64> {
    UNITS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, divisor)| *divisor)
}
