//! `quickdl download <link>` – fetch a file and write it with a progress bar.

use anyhow::{Context, Result};
use quickdl_core::config::QuickConfig;
use quickdl_core::fetch::{clamp_connections, CurlFetcher, Fetcher};
use quickdl_core::output::{self, WriteSummary};
use std::io;
use std::path::{Path, PathBuf};

/// Arguments of one download, with config defaults already applied.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub link: String,
    pub connections: usize,
    pub skip_tls: bool,
    pub output: PathBuf,
}

pub async fn run_download(cfg: &QuickConfig, request: DownloadRequest) -> Result<()> {
    let summary = download_with(CurlFetcher::default(), cfg, &request).await?;
    println!(
        "Saved {} ({} bytes) in {:.1}s",
        request.output.display(),
        summary.bytes,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}

/// Bar label: output file name followed by a space.
fn label_for(output: &Path) -> String {
    output
        .file_name()
        .map(|name| format!("{} ", name.to_string_lossy()))
        .unwrap_or_default()
}

pub(crate) async fn download_with<F>(
    fetcher: F,
    cfg: &QuickConfig,
    request: &DownloadRequest,
) -> Result<WriteSummary>
where
    F: Fetcher + Send + 'static,
{
    let connections = clamp_connections(request.connections);
    tracing::info!(
        link = %request.link,
        connections,
        skip_tls = request.skip_tls,
        "starting download"
    );

    let link = request.link.clone();
    let skip_tls = request.skip_tls;
    let payload = tokio::task::spawn_blocking(move || fetcher.fetch(&link, connections, skip_tls))
        .await?
        .with_context(|| format!("download {}", request.link))?;

    let hide = if cfg.display_progress { None } else { Some(true) };
    let bar = cfg
        .progress
        .bar_config(label_for(&request.output))
        .with_hide(hide);
    let path = request.output.clone();
    let summary = tokio::task::spawn_blocking(move || {
        output::write_with_progress(&path, &payload, bar, io::stderr())
    })
    .await??;

    tracing::info!(
        bytes = summary.bytes,
        chunks = summary.chunks,
        unit = summary.unit,
        "download finished"
    );
    Ok(summary)
}
