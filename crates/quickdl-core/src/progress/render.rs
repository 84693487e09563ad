//! Line templates for the bar.

use super::config::BarConfig;

const SECS_PER_DAY: i64 = 86_400;

/// Length of the filled run: `floor(width * progress / total)`.
///
/// Not clamped; progress past the total yields a run longer than `width`.
/// `total` must be non-zero.
pub fn filled_len(width: usize, progress: u64, total: u64) -> usize {
    (width as u128 * progress as u128 / total as u128) as usize
}

/// Formats seconds as `HH:MM:SS` the way a UTC clock would show them past the epoch.
///
/// Fractions are floored and the hours wrap every 24h, so negative inputs land on the
/// previous day (`-1.0` is `23:59:59`).
pub fn format_hms(secs: f64) -> String {
    let day_secs = (secs.floor() as i64).rem_euclid(SECS_PER_DAY);
    format!(
        "{:02}:{:02}:{:02}",
        day_secs / 3600,
        day_secs % 3600 / 60,
        day_secs % 60
    )
}

pub(crate) fn percent(progress: u64, total: u64) -> f64 {
    progress as f64 / total as f64 * 100.0
}

fn format_percent(pct: f64) -> String {
    if pct.fract() == 0.0 && pct.is_finite() {
        format!("{}", pct as i64)
    } else {
        format!("{pct:.1}")
    }
}

/// Renders one bar frame, terminated by `\r`.
pub(crate) fn bar_line(
    cfg: &BarConfig,
    filled: usize,
    progress: u64,
    total: u64,
    pct: f64,
    time_display: &str,
) -> String {
    let fill: String = std::iter::repeat(cfg.fill_char).take(filled).collect();
    let empty: String = std::iter::repeat(cfg.empty_char)
        .take(cfg.width.saturating_sub(filled))
        .collect();
    if cfg.show_percent {
        format!(
            "{}[{}{}] {}% ({}/{}) {} - {}\r",
            cfg.label,
            fill,
            empty,
            format_percent(pct),
            progress,
            total,
            cfg.unit,
            time_display
        )
    } else {
        format!(
            "{}[{}{}] {}/{} {} - {}\r",
            cfg.label, fill, empty, progress, total, cfg.unit, time_display
        )
    }
}
