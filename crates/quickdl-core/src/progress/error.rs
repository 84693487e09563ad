use std::io;

/// Errors raised while driving a progress tracker.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// No expected total was given at construction or on any report.
    #[error("expected total not initialized")]
    MissingTotal,
    /// A zero total cannot be used as a denominator.
    #[error("expected total must be greater than zero")]
    ZeroTotal,
    /// Writing to the destination failed.
    #[error("progress output: {0}")]
    Io(#[from] io::Error),
}
