use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::progress::BarConfig;

/// Progress bar appearance (`[progress]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Bar width in characters.
    pub width: usize,
    pub fill_char: char,
    pub empty_char: char,
    /// Show the percentage segment.
    pub show_percent: bool,
    /// Cadence divisor for dots/mill indicators.
    pub every: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        let bar = BarConfig::default();
        Self {
            width: bar.width,
            fill_char: bar.fill_char,
            empty_char: bar.empty_char,
            show_percent: bar.show_percent,
            every: bar.every,
        }
    }
}

impl ProgressConfig {
    /// Bar options for one task; the unit is chosen later from the payload size.
    pub fn bar_config(&self, label: impl Into<String>) -> BarConfig {
        BarConfig::new()
            .with_label(label)
            .with_width(self.width)
            .with_every(self.every)
            .with_show_percent(self.show_percent)
            .with_fill(self.fill_char, self.empty_char)
    }
}

/// Global configuration loaded from `~/.config/quickdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickConfig {
    /// Default maximum number of connections per download.
    pub connections: usize,
    /// Skip TLS certificate verification by default.
    pub skip_tls: bool,
    /// Print the welcome banner on startup.
    pub display_startup: bool,
    /// Draw a progress bar while writing output.
    pub display_progress: bool,
    pub progress: ProgressConfig,
}

impl Default for QuickConfig {
    fn default() -> Self {
        Self {
            connections: 32,
            skip_tls: false,
            display_startup: true,
            display_progress: true,
            progress: ProgressConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("quickdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QuickConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<QuickConfig> {
    if !path.exists() {
        let default_cfg = QuickConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: QuickConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = QuickConfig::default();
        assert_eq!(cfg.connections, 32);
        assert!(!cfg.skip_tls);
        assert!(cfg.display_startup);
        assert!(cfg.display_progress);
        assert_eq!(cfg.progress.width, 32);
        assert_eq!(cfg.progress.fill_char, '#');
        assert_eq!(cfg.progress.empty_char, ' ');
        assert!(cfg.progress.show_percent);
        assert_eq!(cfg.progress.every, 1);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = QuickConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: QuickConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            connections = 8

            [progress]
            width = 50
            fill_char = "="
        "#;
        let cfg: QuickConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connections, 8);
        assert!(cfg.display_progress);
        assert_eq!(cfg.progress.width, 50);
        assert_eq!(cfg.progress.fill_char, '=');
        assert_eq!(cfg.progress.empty_char, ' ');
    }

    #[test]
    fn bar_config_carries_appearance() {
        let progress = ProgressConfig {
            width: 12,
            fill_char: '=',
            empty_char: '.',
            show_percent: false,
            every: 3,
        };
        let bar = progress.bar_config("iso ");
        assert_eq!(bar.label, "iso ");
        assert_eq!(bar.width, 12);
        assert_eq!(bar.fill_char, '=');
        assert_eq!(bar.empty_char, '.');
        assert!(!bar.show_percent);
        assert_eq!(bar.every, 3);
        assert!(bar.hide.is_none());
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, QuickConfig::default());

        fs::write(&path, "skip_tls = true\ndisplay_startup = false\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert!(loaded.skip_tls);
        assert!(!loaded.display_startup);
        assert_eq!(loaded.connections, 32);
    }

    #[test]
    fn malformed_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "connections = \"many\"").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
