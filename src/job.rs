//! Batch job files
//!
//! A job lists the designs to print. Each design names an image, a
//! template and the view to render it with, plus how many copies to
//! queue. Jobs are read from TOML or JSON, chosen by file extension:
//!
//! ```toml
//! [[designs]]
//! image = "photos/anna.jpg"
//! shape = "heart"
//! zoom = 1.4
//! pan_x = -20.0
//! copies = 2
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use badgekit_designer::{DesignerOptions, DesignerState, ExportedDocument, TemplateCatalog, DEFAULT_TEMPLATE_KEY};

/// One design entry of a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSpec {
    /// Source image; relative paths are taken from the job file's directory
    pub image: PathBuf,
    /// Template key
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan_x: f64,
    #[serde(default)]
    pub pan_y: f64,
    /// How many times the rendered design is queued
    #[serde(default = "default_copies")]
    pub copies: usize,
}

fn default_shape() -> String {
    DEFAULT_TEMPLATE_KEY.to_string()
}

fn default_zoom() -> f64 {
    1.0
}

fn default_copies() -> usize {
    1
}

/// A batch of designs exported into one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    pub designs: Vec<DesignSpec>,
}

impl JobFile {
    /// Parse a job from TOML or JSON text.
    pub fn parse(content: &str, format: JobFormat) -> anyhow::Result<Self> {
        let job: Self = match format {
            JobFormat::Toml => toml::from_str(content).context("Invalid TOML job")?,
            JobFormat::Json => serde_json::from_str(content).context("Invalid JSON job")?,
        };
        job.validate()?;
        Ok(job)
    }

    /// Load a job file and resolve its image paths.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = JobFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job {}", path.display()))?;
        let mut job = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse job {}", path.display()))?;

        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        tracing::info!(
            "Loaded job {} with {} design(s)",
            path.display(),
            job.designs.len()
        );
        Ok(job)
    }

    /// Make relative image paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for design in &mut self.designs {
            if design.image.is_relative() {
                design.image = base.join(&design.image);
            }
        }
    }

    /// Check template keys, zoom and copy counts.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.designs.is_empty() {
            bail!("Job lists no designs");
        }
        for (index, design) in self.designs.iter().enumerate() {
            TemplateCatalog::lookup(&design.shape)
                .with_context(|| format!("Design {}", index))?;
            if !design.zoom.is_finite() || design.zoom <= 0.0 {
                bail!("Design {}: zoom must be a positive number", index);
            }
            if !design.pan_x.is_finite() || !design.pan_y.is_finite() {
                bail!("Design {}: pan offsets must be finite", index);
            }
            if design.copies == 0 {
                bail!("Design {}: copies must be at least 1", index);
            }
        }
        Ok(())
    }

    /// Number of queue entries the job produces
    pub fn total_copies(&self) -> usize {
        self.designs.iter().map(|d| d.copies).sum()
    }

    /// Render every design, queue its copies and export the document.
    pub fn run(&self, options: DesignerOptions) -> anyhow::Result<ExportedDocument> {
        let mut state = DesignerState::new(options)?;

        for (index, design) in self.designs.iter().enumerate() {
            state
                .open_image(&design.image)
                .with_context(|| format!("Design {}: {}", index, design.image.display()))?;
            apply_view(&mut state, design).with_context(|| format!("Design {}", index))?;

            for _ in 0..design.copies {
                state
                    .add_to_queue()
                    .with_context(|| format!("Design {}", index))?;
            }
            tracing::debug!(
                "Design {} queued {} time(s) as {}",
                index,
                design.copies,
                design.shape
            );
        }

        let document = state.export_pdf().context("Export failed")?;
        tracing::info!(
            "Exported {} design(s) on {} page(s)",
            state.queue().len(),
            document.page_count
        );
        Ok(document)
    }
}

/// Position the loaded image as a design describes.
pub fn apply_view(state: &mut DesignerState, design: &DesignSpec) -> badgekit_core::Result<()> {
    state.select_template(&design.shape)?;
    state.set_zoom(design.zoom)?;
    state.set_pan(design.pan_x, design.pan_y)
}

/// Job file encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Toml,
    Json,
}

impl JobFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => bail!("Unsupported job format: {}", path.display()),
        }
    }
}
