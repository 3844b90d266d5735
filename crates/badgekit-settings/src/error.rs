//! Settings errors.
//!
//! [`SettingsError`] covers reading and writing config files; every file
//! failure carries the path involved. [`ConfigError`] names the setting
//! that [`Config::validate`](crate::Config::validate) rejected.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load, save or locate a configuration file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot write config {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Config {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config {path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot encode config {path} as JSON: {source}")]
    JsonEncode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot encode config {path} as TOML: {source}")]
    TomlEncode {
        path: PathBuf,
        source: toml::ser::Error,
    },

    /// Only `.toml` and `.json` files are understood.
    #[error("Unsupported config format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("This platform has no configuration directory")]
    NoConfigDirectory,

    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// A setting rejected by validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("render.dpi must be a positive number, got {0}")]
    Dpi(f64),

    #[error("render.overlay_alpha must be within 0..=1, got {0}")]
    OverlayAlpha(f32),

    #[error("render.mask_epsilon_px must be a non-negative number, got {0}")]
    MaskEpsilon(f32),

    #[error("page size {width}x{height}mm must be positive")]
    PageSize { width: f64, height: f64 },

    #[error("page.margin_mm must not be negative, got {0}")]
    Margin(f64),

    #[error("page.item_gap_mm must not be negative, got {0}")]
    ItemGap(f64),

    #[error("page.margin_mm {margin} leaves no printable area on a {width}x{height}mm page")]
    NoPrintableArea { margin: f64, width: f64, height: f64 },

    #[error("export.file_prefix must not be empty")]
    EmptyFilePrefix,
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
