//! Configuration and settings management for BadgeKit
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Render settings (resolution, mask epsilon, overlay)
//! - Page settings (paper size, margin, gap between badges)
//! - Export settings (file naming, annotation, output directory)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use badgekit_core::constants;
use badgekit_core::Resolution;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raster rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Print resolution in dots per inch
    pub dpi: f64,
    /// Pixels added to the bleed shape before masking
    pub mask_epsilon_px: f32,
    /// Opacity of the editor overlay outside the visible area
    pub overlay_alpha: f32,
    /// Show the visible-area overlay in editor previews
    pub show_mask: bool,
}

impl RenderSettings {
    /// Resolution derived from `dpi`
    pub fn resolution(&self) -> Resolution {
        Resolution::from_dpi(self.dpi)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dpi: constants::DEFAULT_DPI,
            mask_epsilon_px: constants::MASK_EPSILON_PX,
            overlay_alpha: constants::OVERLAY_ALPHA,
            show_mask: true,
        }
    }
}

/// Paper page settings used by the packing layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Page width in millimeters
    pub width_mm: f64,
    /// Page height in millimeters
    pub height_mm: f64,
    /// Margin on every side in millimeters
    pub margin_mm: f64,
    /// Gap between neighbouring badges in millimeters
    pub item_gap_mm: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width_mm: constants::A4_WIDTH_MM,
            height_mm: constants::A4_HEIGHT_MM,
            margin_mm: constants::PAGE_MARGIN_MM,
            item_gap_mm: constants::ITEM_GAP_MM,
        }
    }
}

/// Document export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Prefix of generated document file names
    pub file_prefix: String,
    /// Print the design count on the first page
    pub annotate: bool,
    /// Directory where documents are written
    pub output_directory: PathBuf,
}

impl ExportSettings {
    /// File name for a document holding `count` designs
    pub fn file_name(&self, count: usize) -> String {
        format!("{}-{}-images.pdf", self.file_prefix, count)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: "badgekit".to_string(),
            annotate: true,
            output_directory: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Render settings
    pub render: RenderSettings,
    /// Page settings
    pub page: PageSettings,
    /// Export settings
    pub export: ExportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|source| SettingsError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            ConfigFormat::Toml => toml::from_str(&content).map_err(|source| SettingsError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|source| SettingsError::JsonEncode {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|source| SettingsError::TomlEncode {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;
        if !positive(render.dpi) {
            return Err(ConfigError::Dpi(render.dpi));
        }
        if !(0.0..=1.0).contains(&render.overlay_alpha) {
            return Err(ConfigError::OverlayAlpha(render.overlay_alpha));
        }
        if !render.mask_epsilon_px.is_finite() || render.mask_epsilon_px < 0.0 {
            return Err(ConfigError::MaskEpsilon(render.mask_epsilon_px));
        }

        let page = &self.page;
        if !positive(page.width_mm) || !positive(page.height_mm) {
            return Err(ConfigError::PageSize {
                width: page.width_mm,
                height: page.height_mm,
            });
        }
        if !non_negative(page.margin_mm) {
            return Err(ConfigError::Margin(page.margin_mm));
        }
        if !non_negative(page.item_gap_mm) {
            return Err(ConfigError::ItemGap(page.item_gap_mm));
        }
        if page.margin_mm * 2.0 >= page.width_mm.min(page.height_mm) {
            return Err(ConfigError::NoPrintableArea {
                margin: page.margin_mm,
                width: page.width_mm,
                height: page.height_mm,
            });
        }

        if self.export.file_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyFilePrefix);
        }

        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Config file encoding, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(SettingsError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
