//! CLI command handlers, one file per command.

mod download;
mod resume;
mod tasks;

pub use download::{run_download, DownloadRequest};
pub use resume::run_resume;
pub use tasks::run_tasks;
