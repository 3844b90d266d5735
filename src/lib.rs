//! # BadgeKit
//!
//! Print preparation for die-cut photo badges:
//! - Position a photo inside a circle or heart template
//! - Mask everything outside the bleed boundary for the cutter
//! - Queue designs and pack them onto printable PDF pages
//!
//! ## Architecture
//!
//! BadgeKit is organized as a workspace with multiple crates:
//!
//! 1. **badgekit-core** - Error taxonomy, units, print constants
//! 2. **badgekit-settings** - Configuration files and persistence
//! 3. **badgekit-designer** - Templates, geometry, rendering, queue, packing, PDF
//! 4. **badgekit** - Job files, logging and the command line binary

pub mod job;

pub use badgekit_core::{DesignerError, Error, ExportError, LayoutError, RenderError, Result};
pub use badgekit_designer as designer;
pub use badgekit_designer::{
    BadgeTemplate, DesignQueue, DesignerOptions, DesignerState, ExportOptions, ExportedDocument,
    PageLayout, RenderStyle, TemplateCatalog,
};
pub use badgekit_settings::{Config, SettingsPersistence};
pub use job::{DesignSpec, JobFile};

use std::path::Path;

use anyhow::Context;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

/// Load the configuration from `path`, or from the platform config
/// location when no path is given. A missing default file yields defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match SettingsPersistence::default_config_path() {
        Ok(default_path) => Ok(SettingsPersistence::load_or_default(&default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()))?
            .into_config()),
        Err(e) => {
            tracing::warn!("{}; using default settings", e);
            Ok(Config::default())
        }
    }
}

/// Session options derived from a configuration
pub fn designer_options(config: &Config) -> DesignerOptions {
    DesignerOptions {
        resolution: config.render.resolution(),
        style: RenderStyle {
            overlay_alpha: config.render.overlay_alpha,
            mask_epsilon_px: config.render.mask_epsilon_px,
            show_mask: config.render.show_mask,
        },
        export: ExportOptions {
            layout: PageLayout::new(
                config.page.width_mm,
                config.page.height_mm,
                config.page.margin_mm,
                config.page.item_gap_mm,
            ),
            file_prefix: config.export.file_prefix.clone(),
            annotate: config.export.annotate,
        },
    }
}
