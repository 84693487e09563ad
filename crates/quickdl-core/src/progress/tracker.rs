//! The progress bar state machine.

use std::io;
use std::time::{Duration, Instant};

use super::config::BarConfig;
use super::destination::Destination;
use super::error::ProgressError;
use super::eta::EtaWindow;
use super::guard::ScopedTracker;
use super::render::{self, filled_len, format_hms};

/// Tracks one bounded task and draws it as a single-line bar.
///
/// Single-threaded; one tracker should own a destination at a time, otherwise
/// frames interleave.
pub struct ProgressTracker<D: Destination = io::Stderr> {
    config: BarConfig,
    dest: D,
    hidden: bool,
    total: Option<u64>,
    current: u64,
    started: Instant,
    eta: EtaWindow,
    eta_display: String,
    total_time: Option<Duration>,
}

impl ProgressTracker<io::Stderr> {
    /// Tracker drawing to the process's standard error.
    pub fn stderr(config: BarConfig, expected_total: Option<u64>) -> Result<Self, ProgressError> {
        Self::new(config, io::stderr(), expected_total)
    }
}

impl<D: Destination> ProgressTracker<D> {
    /// Creates a tracker. With a non-zero `expected_total` the 0% frame is drawn immediately.
    pub fn new(
        config: BarConfig,
        dest: D,
        expected_total: Option<u64>,
    ) -> Result<Self, ProgressError> {
        Self::new_at(config, dest, expected_total, Instant::now())
    }

    /// Like [`new`](Self::new) with an explicit start instant.
    pub fn new_at(
        config: BarConfig,
        dest: D,
        expected_total: Option<u64>,
        now: Instant,
    ) -> Result<Self, ProgressError> {
        let hidden = config.hide.unwrap_or_else(|| !dest.is_interactive());
        let mut tracker = Self {
            config,
            dest,
            hidden,
            total: expected_total,
            current: 0,
            started: now,
            eta: EtaWindow::new(now),
            eta_display: format_hms(0.0),
            total_time: None,
        };
        if matches!(expected_total, Some(t) if t > 0) {
            tracker.report_at(0, None, now)?;
        }
        Ok(tracker)
    }

    /// Reports absolute progress and redraws the line. A `total` replaces the expected total.
    pub fn report(&mut self, progress: u64, total: Option<u64>) -> Result<(), ProgressError> {
        self.report_at(progress, total, Instant::now())
    }

    /// Like [`report`](Self::report) at an explicit instant.
    pub fn report_at(
        &mut self,
        progress: u64,
        total: Option<u64>,
        now: Instant,
    ) -> Result<(), ProgressError> {
        if total.is_some() {
            self.total = total;
        }
        let total = self.total.ok_or(ProgressError::MissingTotal)?;
        if total == 0 {
            return Err(ProgressError::ZeroTotal);
        }
        self.current = progress;

        if self.eta.update(now, self.started, progress, total) {
            self.eta_display = format_hms(self.eta.estimate_secs());
        }

        if self.hidden {
            return Ok(());
        }
        let filled = filled_len(self.config.width, progress, total);
        let line = render::bar_line(
            &self.config,
            filled,
            progress,
            total,
            render::percent(progress, total),
            &self.eta_display,
        );
        self.dest.write_all(line.as_bytes())?;
        self.dest.flush()?;
        Ok(())
    }

    /// Draws the completed bar with the elapsed time, then a newline.
    ///
    /// Returns the elapsed time, which is recorded even when drawing is suppressed.
    /// Calling it again draws the final frame again.
    pub fn finish(&mut self) -> Result<Duration, ProgressError> {
        self.finish_at(Instant::now())
    }

    /// Like [`finish`](Self::finish) at an explicit instant.
    pub fn finish_at(&mut self, now: Instant) -> Result<Duration, ProgressError> {
        let elapsed = now.saturating_duration_since(self.started);
        self.total_time = Some(elapsed);
        tracing::trace!(label = %self.config.label, ?elapsed, "progress finished");

        if !self.hidden {
            let total = self.total.unwrap_or(self.current);
            let line = render::bar_line(
                &self.config,
                self.config.width,
                total,
                total,
                100.0,
                &format_hms(elapsed.as_secs_f64()),
            );
            self.dest.write_all(line.as_bytes())?;
            self.dest.write_all(b"\n")?;
            self.dest.flush()?;
        }
        Ok(elapsed)
    }

    /// Wraps the tracker so [`finish`](Self::finish) runs when the scope ends.
    pub fn scoped(self) -> ScopedTracker<D> {
        ScopedTracker::new(self)
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Current estimate in seconds (stale between recomputes).
    pub fn eta_secs(&self) -> f64 {
        self.eta.estimate_secs()
    }

    pub fn eta_display(&self) -> &str {
        &self.eta_display
    }

    pub fn eta_window(&self) -> &EtaWindow {
        &self.eta
    }

    /// Elapsed time recorded by the last [`finish`](Self::finish).
    pub fn total_time(&self) -> Option<Duration> {
        self.total_time
    }

    pub fn into_destination(self) -> D {
        self.dest
    }
}
