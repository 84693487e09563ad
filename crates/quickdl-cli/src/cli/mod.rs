//! CLI for the QuickDL download accelerator.

mod banner;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quickdl_core::config;
use std::path::PathBuf;

use commands::{run_download, run_resume, run_tasks, DownloadRequest};

/// Top-level CLI for QuickDL.
#[derive(Debug, Parser)]
#[command(name = "quickdl")]
#[command(about = "QuickDL: accelerated file download", long_about = None)]
pub struct Cli {
    /// Do not print the startup banner.
    #[arg(long, global = true)]
    pub no_banner: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a file over multiple connections.
    Download {
        /// The link to your desired file.
        link: String,

        /// Maximum number of connections (default from config, 32).
        connections: Option<usize>,

        /// Skip certificate verification for https.
        #[arg(long)]
        skip_tls: bool,

        /// Output path.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Resume an interrupted download.
    Resume,

    /// List download tasks.
    Tasks,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        if cfg.display_startup && !cli.no_banner {
            banner::print_banner();
        }

        match cli.command {
            CliCommand::Download {
                link,
                connections,
                skip_tls,
                output,
            } => {
                let request = DownloadRequest {
                    link,
                    connections: connections.unwrap_or(cfg.connections),
                    skip_tls: skip_tls || cfg.skip_tls,
                    output,
                };
                run_download(&cfg, request).await?;
            }
            CliCommand::Resume => run_resume().await?,
            CliCommand::Tasks => run_tasks().await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
