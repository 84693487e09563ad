//! `quickdl tasks` – listing download tasks.

use anyhow::Result;

pub async fn run_tasks() -> Result<()> {
    tracing::info!("tasks requested (not available yet)");
    println!("No tasks: task tracking is not available yet.");
    Ok(())
}
