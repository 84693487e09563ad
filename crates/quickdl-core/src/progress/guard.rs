//! RAII guard that finishes a tracker when dropped.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use super::destination::Destination;
use super::error::ProgressError;
use super::tracker::ProgressTracker;

/// Owns a tracker and calls [`ProgressTracker::finish`] on every exit path.
///
/// Use [`close`](Self::close) on the happy path to get the elapsed time and any write
/// error. If the guard is dropped instead (early return, `?`, panic unwinding) the
/// tracker is finished in `Drop` and a failure is only logged.
pub struct ScopedTracker<D: Destination> {
    tracker: ProgressTracker<D>,
    armed: bool,
}

impl<D: Destination> ScopedTracker<D> {
    pub fn new(tracker: ProgressTracker<D>) -> Self {
        Self {
            tracker,
            armed: true,
        }
    }

    /// Finishes the tracker now and disarms the guard.
    pub fn close(mut self) -> Result<Duration, ProgressError> {
        self.armed = false;
        self.tracker.finish()
    }
}

impl<D: Destination> Deref for ScopedTracker<D> {
    type Target = ProgressTracker<D>;

    fn deref(&self) -> &Self::Target {
        &self.tracker
    }
}

impl<D: Destination> DerefMut for ScopedTracker<D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tracker
    }
}

impl<D: Destination> Drop for ScopedTracker<D> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.tracker.finish() {
            tracing::warn!(label = %self.tracker.config().label, "progress finish failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::progress::BarConfig;

    use super::*;

    fn newlines(buf: &[u8]) -> usize {
        buf.iter().filter(|b| **b == b'\n').count()
    }

    #[test]
    fn close_finishes_once() {
        let mut buf = Vec::new();
        let cfg = BarConfig::new().with_hide(Some(false));
        let mut bar = ProgressTracker::new(cfg, &mut buf, Some(4)).unwrap().scoped();
        bar.report(2, None).unwrap();
        let elapsed = bar.close().unwrap();
        assert!(elapsed.as_secs() < 60);
        assert_eq!(newlines(&buf), 1);
    }

    #[test]
    fn drop_finishes_on_early_exit() {
        fn work(bar: &mut ScopedTracker<&mut Vec<u8>>) -> Result<(), ProgressError> {
            bar.report(1, None)?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full").into())
        }

        let mut buf = Vec::new();
        let cfg = BarConfig::new().with_hide(Some(false)).with_width(4);
        {
            let mut bar = ProgressTracker::new(cfg, &mut buf, Some(4)).unwrap().scoped();
            assert!(work(&mut bar).is_err());
        }
        assert_eq!(newlines(&buf), 1);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.trim_end().ends_with("[####] 100% (4/4) it - 00:00:00"));
    }

    #[test]
    fn drop_finishes_on_panic() {
        let mut buf = Vec::new();
        let cfg = BarConfig::new().with_hide(Some(false));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _bar = ProgressTracker::new(cfg, &mut buf, Some(2)).unwrap().scoped();
            panic!("consumer failed");
        }));
        assert!(result.is_err());
        assert_eq!(newlines(&buf), 1);
    }
}
