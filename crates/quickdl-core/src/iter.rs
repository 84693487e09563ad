//! Iterator adapters that draw progress as the wrapped iterator is consumed.
//!
//! [`ProgressIteratorExt`] adds three wrappers to every [`Iterator`]:
//!
//! * [`with_bar`](ProgressIteratorExt::with_bar): a full [`ProgressTracker`] bar.
//! * [`with_dots`](ProgressIteratorExt::with_dots): one `.` every `every` items.
//! * [`with_mill`](ProgressIteratorExt::with_mill): a rotating glyph with raw counts.
//!
//! Items pass through unchanged. Nothing is drawn until the first `next()`. The expected
//! total comes from [`Iterator::size_hint`] when it is exact, or from `expected_total`.
//!
//! `Iterator::next` cannot return errors, so a failed write is logged once, stops all
//! further drawing for that adapter and is kept for [`take_error`](BarIter::take_error).
//!
//! ```no_run
//! use quickdl_core::iter::ProgressIteratorExt;
//! use quickdl_core::progress::BarConfig;
//!
//! let chunks = vec![vec![0u8; 512]; 8];
//! let mut bytes = 0;
//! for chunk in chunks.iter().with_bar(BarConfig::new().with_label("parts ")) {
//!     bytes += chunk.len();
//! }
//! assert_eq!(bytes, 4096);
//! ```

use std::io;

use crate::progress::{BarConfig, Destination, ProgressError, ProgressTracker};

pub const DOTS_CHAR: char = '.';
pub const MILL_CHARS: [char; 4] = ['|', '/', '-', '\\'];

/// Exact length from `size_hint`, if the iterator knows it.
fn exact_len<I: Iterator>(iter: &I) -> Option<u64> {
    match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(upper as u64),
        _ => None,
    }
}

/// Destination plus the suppression flag and the first write error.
struct Sink<D> {
    dest: D,
    hidden: bool,
    error: Option<ProgressError>,
}

impl<D: Destination> Sink<D> {
    fn new(dest: D, hide: Option<bool>) -> Self {
        let hidden = hide.unwrap_or_else(|| !dest.is_interactive());
        Self {
            dest,
            hidden,
            error: None,
        }
    }

    /// In-place drawing; skipped when hidden.
    fn draw(&mut self, s: &str) {
        if !self.hidden {
            self.write(s);
        }
    }

    /// Unconditional write (line terminators).
    fn write(&mut self, s: &str) {
        if self.error.is_some() {
            return;
        }
        let result = io::Write::write_all(&mut self.dest, s.as_bytes())
            .and_then(|()| io::Write::flush(&mut self.dest));
        if let Err(e) = result {
            tracing::warn!("progress output failed, drawing disabled: {}", e);
            self.error = Some(e.into());
        }
    }
}

enum BarState<D: Destination> {
    Pending { config: BarConfig, dest: D },
    Active(ProgressTracker<D>),
    Done,
}

/// Adapter drawing a [`ProgressTracker`] bar. See [`ProgressIteratorExt::with_bar`].
pub struct BarIter<I, D: Destination> {
    iter: I,
    state: BarState<D>,
    expected: Option<u64>,
    yielded: u64,
    reported: u64,
    exhausted: bool,
    error: Option<ProgressError>,
}

impl<I, D: Destination> BarIter<I, D> {
    /// Overrides the expected total taken from `size_hint`.
    #[must_use]
    pub fn expected_total(mut self, total: u64) -> Self {
        self.expected = Some(total);
        self
    }

    /// Number of items handed out so far.
    pub fn position(&self) -> u64 {
        self.yielded
    }

    /// Whether the nested tracker is finished (or was dropped after a drawing error).
    pub fn is_finished(&self) -> bool {
        matches!(self.state, BarState::Done)
    }

    /// Takes the first drawing error, if any.
    pub fn take_error(&mut self) -> Option<ProgressError> {
        self.error.take()
    }

    fn record(&mut self, e: ProgressError) {
        tracing::warn!("progress bar failed, drawing disabled: {}", e);
        if self.error.is_none() {
            self.error = Some(e);
        }
        self.state = BarState::Done;
    }

    fn start(&mut self) {
        if !matches!(self.state, BarState::Pending { .. }) {
            return;
        }
        if let BarState::Pending { config, dest } =
            std::mem::replace(&mut self.state, BarState::Done)
        {
            match ProgressTracker::new(config, dest, self.expected) {
                Ok(tracker) => self.state = BarState::Active(tracker),
                Err(e) => self.record(e),
            }
        }
    }

    fn report_pending(&mut self) {
        if self.reported == self.yielded {
            return;
        }
        self.reported = self.yielded;
        let result = match &mut self.state {
            BarState::Active(tracker) => tracker.report(self.yielded, None),
            _ => return,
        };
        if let Err(e) = result {
            self.record(e);
        }
    }

    fn finish(&mut self) {
        if let BarState::Active(mut tracker) = std::mem::replace(&mut self.state, BarState::Done)
        {
            if let Err(e) = tracker.finish() {
                self.record(e);
            }
        }
    }
}

impl<I: Iterator, D: Destination> Iterator for BarIter<I, D> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        self.start();
        // The consumer is back, so the previous item is done.
        self.report_pending();

        match self.iter.next() {
            Some(item) => {
                self.yielded += 1;
                Some(item)
            }
            None => {
                self.exhausted = true;
                self.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, D: Destination> Drop for BarIter<I, D> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Adapter printing one marker per `every` items. See [`ProgressIteratorExt::with_dots`].
pub struct DotsIter<I, D: Destination> {
    iter: I,
    sink: Sink<D>,
    label: String,
    every: u64,
    index: u64,
    started: bool,
    done: bool,
}

impl<I, D: Destination> DotsIter<I, D> {
    pub fn position(&self) -> u64 {
        self.index
    }

    pub fn take_error(&mut self) -> Option<ProgressError> {
        self.sink.error.take()
    }
}

impl<I: Iterator, D: Destination> Iterator for DotsIter<I, D> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            let label = std::mem::take(&mut self.label);
            self.sink.draw(&label);
        }
        match self.iter.next() {
            Some(item) => {
                if self.index % self.every == 0 {
                    self.sink.draw(DOTS_CHAR.encode_utf8(&mut [0u8; 4]));
                }
                self.index += 1;
                Some(item)
            }
            None => {
                self.done = true;
                self.sink.write("\n");
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Adapter drawing a spinner with raw counts. See [`ProgressIteratorExt::with_mill`].
pub struct MillIter<I, D: Destination> {
    iter: I,
    sink: Sink<D>,
    label: String,
    every: u64,
    count: Option<u64>,
    index: u64,
    pending: bool,
    started: bool,
    done: bool,
}

impl<I, D: Destination> MillIter<I, D> {
    /// Overrides the expected total taken from `size_hint`.
    #[must_use]
    pub fn expected_total(mut self, total: u64) -> Self {
        self.count = Some(total);
        self
    }

    pub fn position(&self) -> u64 {
        self.index
    }

    pub fn take_error(&mut self) -> Option<ProgressError> {
        self.sink.error.take()
    }

    fn glyph(&self, i: u64) -> char {
        match self.count {
            Some(count) if i >= count => ' ',
            _ => MILL_CHARS[((i / self.every) % MILL_CHARS.len() as u64) as usize],
        }
    }

    fn show(&mut self, i: u64) {
        if i % self.every != 0 && Some(i) != self.count {
            return;
        }
        let count = self
            .count
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        let line = format!("{} {} {}/{}\r", self.label, self.glyph(i), i, count);
        self.sink.draw(&line);
    }
}

impl<I: Iterator, D: Destination> Iterator for MillIter<I, D> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.count.is_some_and(|c| c > 0) {
                self.show(0);
            }
        }
        if self.pending {
            self.pending = false;
            self.show(self.index);
        }
        match self.iter.next() {
            Some(item) => {
                self.index += 1;
                self.pending = true;
                Some(item)
            }
            None => {
                self.done = true;
                self.sink.write("\n");
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait attaching progress output to any iterator.
pub trait ProgressIteratorExt: Iterator + Sized {
    /// Wraps the iterator in a bar drawn on standard error.
    fn with_bar(self, config: BarConfig) -> BarIter<Self, io::Stderr> {
        self.with_bar_to(config, io::stderr())
    }

    /// Wraps the iterator in a bar drawn on `dest`.
    fn with_bar_to<D: Destination>(self, config: BarConfig, dest: D) -> BarIter<Self, D> {
        let expected = exact_len(&self);
        BarIter {
            iter: self,
            state: BarState::Pending { config, dest },
            expected,
            yielded: 0,
            reported: 0,
            exhausted: false,
            error: None,
        }
    }

    /// Wraps the iterator in a dots indicator on standard error.
    fn with_dots(self, config: BarConfig) -> DotsIter<Self, io::Stderr> {
        self.with_dots_to(config, io::stderr())
    }

    /// Wraps the iterator in a dots indicator on `dest`.
    fn with_dots_to<D: Destination>(self, config: BarConfig, dest: D) -> DotsIter<Self, D> {
        let every = config.every();
        DotsIter {
            iter: self,
            sink: Sink::new(dest, config.hide),
            label: config.label,
            every,
            index: 0,
            started: false,
            done: false,
        }
    }

    /// Wraps the iterator in a mill (spinner) on standard error.
    fn with_mill(self, config: BarConfig) -> MillIter<Self, io::Stderr> {
        self.with_mill_to(config, io::stderr())
    }

    /// Wraps the iterator in a mill (spinner) on `dest`.
    fn with_mill_to<D: Destination>(self, config: BarConfig, dest: D) -> MillIter<Self, D> {
        let every = config.every();
        let count = exact_len(&self);
        MillIter {
            iter: self,
            sink: Sink::new(dest, config.hide),
            label: config.label,
            every,
            count,
            index: 0,
            pending: false,
            started: false,
            done: false,
        }
    }
}

impl<I: Iterator> ProgressIteratorExt for I {}
