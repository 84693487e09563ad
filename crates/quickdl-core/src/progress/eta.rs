//! Throttled, windowed ETA estimation.
//!
//! Each recompute takes a sample `elapsed / (current + 1)`: the cumulative time per item
//! so far, biased by one item so progress 0 is defined. The estimate is the mean of the
//! window times the remaining items. Cumulative samples pull the estimate toward the
//! historical average rate instead of the latest burst; the mean damps jitter between
//! samples.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Minimum spacing between two ETA recomputations.
pub const ETA_INTERVAL: Duration = Duration::from_secs(1);

/// Samples kept from earlier intervals; the current sample comes on top.
pub const ETA_SMA_WINDOW: usize = 9;

/// Rolling window of rate samples plus the last estimate derived from it.
#[derive(Debug, Clone)]
pub struct EtaWindow {
    samples: VecDeque<f64>,
    last_computed: Instant,
    estimate_secs: f64,
}

impl EtaWindow {
    /// Starts an empty window; the first recompute is due one interval after `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            samples: VecDeque::with_capacity(Self::capacity()),
            last_computed: now,
            estimate_secs: 0.0,
        }
    }

    /// Maximum number of samples held at once.
    pub const fn capacity() -> usize {
        ETA_SMA_WINDOW + 1
    }

    /// Recomputes the estimate if a full interval has passed since the last one.
    ///
    /// Returns `true` when a new sample was taken.
    pub fn update(&mut self, now: Instant, started: Instant, current: u64, total: u64) -> bool {
        if now.saturating_duration_since(self.last_computed) < ETA_INTERVAL {
            return false;
        }
        self.last_computed = now;

        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        while self.samples.len() > ETA_SMA_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(elapsed / (current as f64 + 1.0));

        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        self.estimate_secs = mean * (total as f64 - current as f64);
        true
    }

    /// Last estimate in seconds. Negative when progress overshot the total.
    pub fn estimate_secs(&self) -> f64 {
        self.estimate_secs
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
