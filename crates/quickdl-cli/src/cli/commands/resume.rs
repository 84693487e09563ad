//! `quickdl resume` – resuming interrupted downloads.

use anyhow::Result;

pub async fn run_resume() -> Result<()> {
    // TODO: needs a persisted task list to pick up partial downloads from.
    tracing::info!("resume requested (not available yet)");
    println!("Resume is not available yet.");
    Ok(())
}
