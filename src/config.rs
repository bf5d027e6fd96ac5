use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::badge::Theme;

pub const MIN_TICK_MS: u64 = 16;
pub const MAX_TICK_MS: u64 = 2_000;

// ── Theme section ─────────────────────────────────────────────────────────────

/// Colour names as written in the config file. Parsed with ratatui's
/// `Color::from_str`, so "blue", "#00c8ff" and "42" all work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_busy")]
    pub busy: String,
    #[serde(default = "default_done")]
    pub done: String,
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_busy() -> String {
    "blue".to_string()
}

fn default_done() -> String {
    "green".to_string()
}

fn default_label() -> String {
    "gray".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            busy: default_busy(),
            done: default_done(),
            label: default_label(),
        }
    }
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Theme {
        let fallback = Theme::default();
        Theme {
            busy: parse_color("busy", &self.busy, fallback.busy),
            done: parse_color("done", &self.done, fallback.done),
            label: parse_color("label", &self.label, fallback.label),
        }
    }
}

fn parse_color(key: &str, raw: &str, fallback: Color) -> Color {
    Color::from_str(raw).unwrap_or_else(|_| {
        tracing::warn!(key, value = raw, "unknown colour in config, using default");
        fallback
    })
}

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Spinner frame period in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_tick_ms() -> u64 {
    120
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            theme: ThemeConfig::default(),
        }
    }
}

impl ConfigFile {
    /// Load from the user config path, or defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    /// Write a starter config file to disk (only if it doesn't exist).
    pub fn write_default_if_missing() -> Result<PathBuf> {
        let path = config_path();
        write_default_at(&path)?;
        Ok(path)
    }
}

fn write_default_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("Failed to write config file at {}", path.display()))
}

// ── Resolved runtime config (after merging file + CLI overrides) ──────────────

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub tick_ms: u64,
    pub theme: Theme,
}

impl ResolvedConfig {
    /// Priority: CLI args > env vars (handled by clap) > config file > built-in defaults
    pub fn resolve(file: &ConfigFile, tick_override: Option<u64>) -> Self {
        let tick_ms = tick_override
            .unwrap_or(file.tick_ms)
            .clamp(MIN_TICK_MS, MAX_TICK_MS);
        Self {
            tick_ms,
            theme: file.theme.to_theme(),
        }
    }
}

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn config_path() -> PathBuf {
    dirs_config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolbadge")
        .join("config.toml")
}

fn dirs_config_dir() -> Option<PathBuf> {
    // XDG_CONFIG_HOME or ~/.config on Linux/macOS, %APPDATA% on Windows
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .or_else(|| std::env::var("APPDATA").ok().map(PathBuf::from))
}

// ── Default config template written by --init ─────────────────────────────────

const DEFAULT_CONFIG_TOML: &str = r##"# toolbadge configuration
# Run `toolbadge --init` to regenerate this file.

# Spinner frame period in milliseconds (16–2000)
tick_ms = 120

# ── Colours ───────────────────────────────────────────────────────────────────
# Names ("blue", "lightgreen"), hex ("#00c8ff") or 256-colour indices ("42").
[theme]
busy  = "blue"    # spinner on running tool calls
done  = "green"   # dot on completed tool calls
label = "gray"    # label text
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(file.tick_ms, 120);
        assert_eq!(file.theme.busy, "blue");
    }

    #[test]
    fn test_default_template_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        write_default_at(&path).unwrap();
        let file = ConfigFile::load_from(&path).unwrap();
        assert_eq!(file.tick_ms, 120);
        assert_eq!(file.theme.to_theme(), Theme::default());
    }

    #[test]
    fn test_write_default_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_ms = 80\n").unwrap();
        write_default_at(&path).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().tick_ms, 80);
    }

    #[test]
    fn test_partial_theme_and_custom_colours() {
        let file: ConfigFile = toml::from_str("[theme]\ndone = \"#ff0000\"\n").unwrap();
        let theme = file.theme.to_theme();
        assert_eq!(theme.done, Color::Rgb(255, 0, 0));
        assert_eq!(theme.busy, Color::Blue);
    }

    #[test]
    fn test_bad_colour_falls_back() {
        let file: ConfigFile = toml::from_str("[theme]\nbusy = \"not-a-colour\"\n").unwrap();
        assert_eq!(file.theme.to_theme().busy, Theme::default().busy);
    }

    #[test]
    fn test_unparseable_file_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_ms = \"fast\"").unwrap();
        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_resolve_override_and_clamp() {
        let file = ConfigFile::default();
        assert_eq!(ResolvedConfig::resolve(&file, None).tick_ms, 120);
        assert_eq!(ResolvedConfig::resolve(&file, Some(60)).tick_ms, 60);
        assert_eq!(ResolvedConfig::resolve(&file, Some(1)).tick_ms, MIN_TICK_MS);
        assert_eq!(ResolvedConfig::resolve(&file, Some(99_999)).tick_ms, MAX_TICK_MS);
    }
}
