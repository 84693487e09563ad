//! Rendering configuration shared by the bar and the iterator adapters.

pub const BAR_FILLED_CHAR: char = '#';
pub const BAR_EMPTY_CHAR: char = ' ';
pub const DEFAULT_WIDTH: usize = 32;

/// Options for a progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarConfig {
    /// Text printed before the bar (include a trailing space if wanted).
    pub label: String,
    /// Unit label printed after the counts.
    pub unit: String,
    /// Bar width in characters.
    pub width: usize,
    pub fill_char: char,
    pub empty_char: char,
    /// Cadence divisor for the dots and mill adapters.
    pub every: u64,
    pub show_percent: bool,
    /// `Some(true)` always hides, `Some(false)` always draws, `None` asks the destination.
    pub hide: Option<bool>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            unit: "it".to_string(),
            width: DEFAULT_WIDTH,
            fill_char: BAR_FILLED_CHAR,
            empty_char: BAR_EMPTY_CHAR,
            every: 1,
            show_percent: true,
            hide: None,
        }
    }
}

impl BarConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill_char: char, empty_char: char) -> Self {
        self.fill_char = fill_char;
        self.empty_char = empty_char;
        self
    }

    /// Sets the cadence divisor; zero is treated as one.
    #[must_use]
    pub fn with_every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    #[must_use]
    pub fn with_show_percent(mut self, show_percent: bool) -> Self {
        self.show_percent = show_percent;
        self
    }

    #[must_use]
    pub fn with_hide(mut self, hide: Option<bool>) -> Self {
        self.hide = hide;
        self
    }

    /// Cadence divisor, never zero.
    pub(crate) fn every(&self) -> u64 {
        self.every.max(1)
    }
}
