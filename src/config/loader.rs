//! Configuration file loading with precedence handling.

use crate::model::Size;
use crate::state::{ListSettings, DEFAULT_PAGE_SIZE, DEFAULT_SCREENS_AHEAD};
use crate::view_state::ReviewItem;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "REVIEWFEED_CONFIG";
/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "REVIEWFEED_PAGE_SIZE";
/// Environment variable overriding the simulated fetch latency.
pub const LATENCY_ENV: &str = "REVIEWFEED_LATENCY_MS";

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

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// A resolved setting is out of range.
    #[error("Invalid setting {field}: {reason}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/reviewfeed/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Records per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Load-more trigger distance in viewport heights.
    #[serde(default)]
    pub screens_ahead: Option<f64>,

    /// Line limit for review bodies.
    #[serde(default)]
    pub max_body_lines: Option<usize>,

    /// Viewport width in points.
    #[serde(default)]
    pub viewport_width: Option<f64>,

    /// Viewport height in points.
    #[serde(default)]
    pub viewport_height: Option<f64>,

    /// Simulated latency of the local source, in milliseconds.
    #[serde(default)]
    pub fetch_latency_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Records per page.
    pub page_size: usize,
    /// Load-more trigger distance in viewport heights.
    pub screens_ahead: f64,
    /// Line limit for review bodies.
    pub max_body_lines: usize,
    /// Viewport width in points.
    pub viewport_width: f64,
    /// Viewport height in points.
    pub viewport_height: f64,
    /// Simulated fetch latency in milliseconds.
    pub fetch_latency_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            screens_ahead: DEFAULT_SCREENS_AHEAD,
            max_body_lines: ReviewItem::DEFAULT_MAX_LINES,
            viewport_width: 375.0,
            viewport_height: 667.0,
            fetch_latency_ms: 0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Controller settings derived from this config.
    pub fn list_settings(&self) -> ListSettings {
        ListSettings {
            page_size: self.page_size,
            max_body_lines: self.max_body_lines,
            screens_ahead: self.screens_ahead,
        }
    }

    /// Viewport size in points.
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Simulated fetch latency.
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero page size or body line
    /// limit, a non-positive viewport dimension, or a negative or non-finite
    /// trigger distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        if self.max_body_lines == 0 {
            return Err(invalid("max_body_lines", "must be at least 1"));
        }
        if !self.screens_ahead.is_finite() || self.screens_ahead < 0.0 {
            return Err(invalid(
                "screens_ahead",
                format!("must be a finite, non-negative number (got {})", self.screens_ahead),
            ));
        }
        for (field, value) in [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive (got {})", value)));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/reviewfeed/reviewfeed.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("reviewfeed").join("reviewfeed.log")
    } else {
        PathBuf::from("reviewfeed.log")
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

    // Missing file is not an error - use defaults
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
/// Returns `~/.config/reviewfeed/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reviewfeed").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `REVIEWFEED_CONFIG` environment variable
/// 3. Default path `~/.config/reviewfeed/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
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

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        screens_ahead: config.screens_ahead.unwrap_or(defaults.screens_ahead),
        max_body_lines: config.max_body_lines.unwrap_or(defaults.max_body_lines),
        viewport_width: config.viewport_width.unwrap_or(defaults.viewport_width),
        viewport_height: config.viewport_height.unwrap_or(defaults.viewport_height),
        fetch_latency_ms: config.fetch_latency_ms.unwrap_or(defaults.fetch_latency_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `REVIEWFEED_PAGE_SIZE`: Override page size
/// - `REVIEWFEED_LATENCY_MS`: Override simulated fetch latency
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnv` if a set variable is not a
/// non-negative integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(page_size) = env_number(PAGE_SIZE_ENV)? {
        config.page_size = page_size as usize;
    }
    if let Some(latency) = env_number(LATENCY_ENV)? {
        config.fetch_latency_ms = latency;
    }
    Ok(config)
}

fn env_number(name: &'static str) -> Result<Option<u64>, ConfigError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<usize>,
    latency_override: Option<u64>,
    width_override: Option<f64>,
    height_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if let Some(latency) = latency_override {
        config.fetch_latency_ms = latency;
    }

    if let Some(width) = width_override {
        config.viewport_width = width;
    }

    if let Some(height) = height_override {
        config.viewport_height = height;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
