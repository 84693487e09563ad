//! Tests for resume, tasks and global flags.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_resume() {
    assert!(matches!(parse(&["quickdl", "resume"]), CliCommand::Resume));
}

#[test]
fn cli_parse_tasks() {
    assert!(matches!(parse(&["quickdl", "tasks"]), CliCommand::Tasks));
}

#[test]
fn cli_no_banner_is_global() {
    let cli = Cli::try_parse_from(["quickdl", "tasks", "--no-banner"]).unwrap();
    assert!(cli.no_banner);
    let cli = Cli::try_parse_from(["quickdl", "--no-banner", "resume"]).unwrap();
    assert!(cli.no_banner);
    let cli = Cli::try_parse_from(["quickdl", "resume"]).unwrap();
    assert!(!cli.no_banner);
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["quickdl"]).is_err());
}
