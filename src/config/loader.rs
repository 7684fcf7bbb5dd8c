//! Configuration file loading with precedence handling.

use crate::view_state::{LayoutMetrics, ScrollConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MAGIC_WORDS_CONFIG";

/// Environment variable overriding the wheel/arrow-key scroll step.
pub const WHEEL_STEP_ENV_VAR: &str = "MAGIC_WORDS_WHEEL_STEP";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/magic-words/config.toml`.
///
/// ```toml
/// line_height = 1
/// glyph_width = 2
/// show_speaker = false
/// decay_factor = 0.9
/// wheel_step = 2
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Vertical advance per wrapped line.
    #[serde(default)]
    pub line_height: Option<f64>,

    /// Inline glyph width.
    #[serde(default)]
    pub glyph_width: Option<f64>,

    /// Inline glyph height.
    #[serde(default)]
    pub glyph_height: Option<f64>,

    /// Avatar icon width.
    #[serde(default)]
    pub avatar_width: Option<f64>,

    /// Avatar icon height.
    #[serde(default)]
    pub avatar_height: Option<f64>,

    /// Space between avatar and text.
    #[serde(default)]
    pub avatar_gap: Option<f64>,

    /// Space below each row.
    #[serde(default)]
    pub row_gap: Option<f64>,

    /// Space removed from each side of the viewport.
    #[serde(default)]
    pub horizontal_padding: Option<f64>,

    /// Prefix rows with the speaker's name.
    #[serde(default)]
    pub show_speaker: Option<bool>,

    /// Release speed above which inertia starts.
    #[serde(default)]
    pub inertia_threshold: Option<f64>,

    /// Velocity multiplier per frame.
    #[serde(default)]
    pub decay_factor: Option<f64>,

    /// Speed below which inertia stops.
    #[serde(default)]
    pub stop_threshold: Option<f64>,

    /// Offset change per wheel notch or arrow key.
    #[serde(default)]
    pub wheel_step: Option<f64>,

    /// Nominal frame length in milliseconds.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Layout sizes.
    pub metrics: LayoutMetrics,
    /// Inertia tuning.
    pub scroll: ScrollConfig,
    /// Offset change per wheel notch or arrow key.
    pub wheel_step: f64,
    /// Nominal frame length in milliseconds.
    pub frame_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::terminal(),
            scroll: ScrollConfig::default(),
            wheel_step: 3.0,
            frame_interval_ms: 16,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Nominal frame length.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Replace out-of-range values with usable ones.
    ///
    /// - sizes that must be positive (line height, glyph and avatar sizes,
    ///   wheel step, frame interval) fall back to defaults when not
    /// - gaps, padding and thresholds fall back to defaults when negative
    /// - `decay_factor` is clamped to `[0, 1]`
    ///
    /// Non-finite values count as out of range.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let d = defaults.metrics;
        let m = self.metrics;

        let metrics = LayoutMetrics {
            line_height: positive_or(m.line_height, d.line_height),
            glyph_width: positive_or(m.glyph_width, d.glyph_width),
            glyph_height: positive_or(m.glyph_height, d.glyph_height),
            avatar_width: positive_or(m.avatar_width, d.avatar_width),
            avatar_height: positive_or(m.avatar_height, d.avatar_height),
            avatar_gap: non_negative_or(m.avatar_gap, d.avatar_gap),
            row_gap: non_negative_or(m.row_gap, d.row_gap),
            horizontal_padding: non_negative_or(m.horizontal_padding, d.horizontal_padding),
            show_speaker: m.show_speaker,
        };

        let decay_factor = if self.scroll.decay_factor.is_nan() {
            defaults.scroll.decay_factor
        } else {
            self.scroll.decay_factor.clamp(0.0, 1.0)
        };

        let scroll = ScrollConfig {
            inertia_threshold: non_negative_or(
                self.scroll.inertia_threshold,
                defaults.scroll.inertia_threshold,
            ),
            decay_factor,
            stop_threshold: non_negative_or(self.scroll.stop_threshold, defaults.scroll.stop_threshold),
            inertia_enabled: self.scroll.inertia_enabled,
        };

        Self {
            metrics,
            scroll,
            wheel_step: positive_or(self.wheel_step, defaults.wheel_step),
            frame_interval_ms: if self.frame_interval_ms == 0 {
                defaults.frame_interval_ms
            } else {
                self.frame_interval_ms
            },
            log_file_path: self.log_file_path,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/magic-words/magic-words.log` on Linux, or the
/// platform's state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("magic-words").join("magic-words.log")
    } else {
        PathBuf::from("magic-words.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/magic-words/config.toml` on Linux, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("magic-words").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MAGIC_WORDS_CONFIG` environment variable
/// 3. Default path `~/.config/magic-words/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let d = defaults.metrics;
    let metrics = LayoutMetrics {
        line_height: config.line_height.unwrap_or(d.line_height),
        glyph_width: config.glyph_width.unwrap_or(d.glyph_width),
        glyph_height: config.glyph_height.unwrap_or(d.glyph_height),
        avatar_width: config.avatar_width.unwrap_or(d.avatar_width),
        avatar_height: config.avatar_height.unwrap_or(d.avatar_height),
        avatar_gap: config.avatar_gap.unwrap_or(d.avatar_gap),
        row_gap: config.row_gap.unwrap_or(d.row_gap),
        horizontal_padding: config.horizontal_padding.unwrap_or(d.horizontal_padding),
        show_speaker: config.show_speaker.unwrap_or(d.show_speaker),
    };

    let scroll = ScrollConfig {
        inertia_threshold: config
            .inertia_threshold
            .unwrap_or(defaults.scroll.inertia_threshold),
        decay_factor: config.decay_factor.unwrap_or(defaults.scroll.decay_factor),
        stop_threshold: config
            .stop_threshold
            .unwrap_or(defaults.scroll.stop_threshold),
        inertia_enabled: defaults.scroll.inertia_enabled,
    };

    ResolvedConfig {
        metrics,
        scroll,
        wheel_step: config.wheel_step.unwrap_or(defaults.wheel_step),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `MAGIC_WORDS_WHEEL_STEP`: Override the wheel step. Unparseable values
///   are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(WHEEL_STEP_ENV_VAR) {
        match raw.trim().parse::<f64>() {
            Ok(step) => config.wheel_step = step,
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid {WHEEL_STEP_ENV_VAR}"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `inertia_override` - `Some(false)` from `--no-inertia`
/// * `speaker_override` - `Some(false)` from `--no-speaker`
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    inertia_override: Option<bool>,
    speaker_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(inertia) = inertia_override {
        config.scroll.inertia_enabled = inertia;
    }

    if let Some(show_speaker) = speaker_override {
        config.metrics.show_speaker = show_speaker;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
