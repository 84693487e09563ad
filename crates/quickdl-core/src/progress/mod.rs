//! Terminal progress bar with a smoothed ETA.
//!
//! A [`ProgressTracker`] is driven by reporting absolute progress values; each report
//! redraws a single line in place (carriage return, no newline) on its [`Destination`].
//! The ETA is recomputed at most once per [`ETA_INTERVAL`] from a moving average of
//! cumulative per-item times. Rendering is suppressed for non-interactive destinations
//! unless the configuration forces it either way.

mod config;
mod destination;
mod error;
mod eta;
mod guard;
mod render;
mod tracker;

pub use config::BarConfig;
pub use destination::Destination;
pub use error::ProgressError;
pub use eta::{EtaWindow, ETA_INTERVAL, ETA_SMA_WINDOW};
pub use guard::ScopedTracker;
pub use render::{filled_len, format_hms};
pub use tracker::ProgressTracker;
