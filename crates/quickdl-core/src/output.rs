//! Writing a fetched payload to disk while drawing a progress bar.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::progress::{BarConfig, Destination, ProgressTracker};
use crate::units::{select_unit, unit_divisor};

/// Summary of a finished write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub bytes: u64,
    pub chunks: u64,
    pub unit: &'static str,
    pub elapsed: Duration,
}

/// Writes `payload` to `path` in unit-sized chunks, reporting chunks written to a bar.
///
/// The unit is picked from the payload size (e.g. a 40 MiB payload is written in 1 MiB
/// chunks and shown as `n/40 MiB`). The bar is finished on every exit path.
pub fn write_with_progress<D: Destination>(
    path: &Path,
    payload: &[u8],
    config: BarConfig,
    dest: D,
) -> Result<WriteSummary> {
    let (_, unit) = select_unit(payload.len() as u64);
    let chunk_size = unit_divisor(unit).unwrap_or(1) as usize;
    let chunks = payload.len().div_ceil(chunk_size) as u64;

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut file = BufWriter::new(file);

    let mut bar = ProgressTracker::new(config.with_unit(unit), dest, Some(chunks))?.scoped();
    for (i, chunk) in payload.chunks(chunk_size).enumerate() {
        file.write_all(chunk)
            .with_context(|| format!("write to {}", path.display()))?;
        bar.report(i as u64 + 1, None)?;
    }
    file.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    let elapsed = bar.close()?;

    tracing::info!(
        path = %path.display(),
        bytes = payload.len(),
        chunks,
        unit,
        ?elapsed,
        "output written"
    );
    Ok(WriteSummary {
        bytes: payload.len() as u64,
        chunks,
        unit,
        elapsed,
    })
}
