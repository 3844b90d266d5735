//! Export pipeline: queued rasters → packed pages → document bytes.
//!
//! Rasters are rendered when a design is queued, so exporting only packs
//! the queue and hands each raster to a [`DocumentEncoder`] at its
//! placement.

use badgekit_core::{ExportError, Result};

use crate::packing::{page_count, PageLayout, Placement, ShelfPacker};
use crate::queue::DesignQueue;

/// Annotation position on the first page (mm from top-left)
const ANNOTATION_X_MM: f64 = 10.0;
const ANNOTATION_Y_MM: f64 = 10.0;
/// Annotation font size (pt)
const ANNOTATION_SIZE_PT: f64 = 10.0;
/// Annotation gray level (0 = black, 255 = white)
const ANNOTATION_GRAY: u8 = 100;

/// A paginated document sink taking absolutely positioned rasters.
///
/// All positions are millimeters from the top-left corner of the page.
pub trait DocumentEncoder {
    /// Starts a new page and returns its index.
    fn add_page(&mut self, width_mm: f64, height_mm: f64) -> usize;

    /// Draws a PNG raster stretched to `width_mm x height_mm`.
    fn draw_image(
        &mut self,
        page: usize,
        png: &[u8],
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    ) -> std::result::Result<(), ExportError>;

    /// Draws a line of text with its baseline at `y_mm`.
    fn draw_text(
        &mut self,
        page: usize,
        text: &str,
        x_mm: f64,
        y_mm: f64,
        size_pt: f64,
        gray: u8,
    ) -> std::result::Result<(), ExportError>;

    /// Finishes the document and returns its bytes.
    fn finish(&mut self) -> std::result::Result<Vec<u8>, ExportError>;
}

/// Export options
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Page parameters
    pub layout: PageLayout,
    /// Prefix of the output file name
    pub file_prefix: String,
    /// Print the design count on the first page
    pub annotate: bool,
}

impl ExportOptions {
    /// File name for a document holding `count` designs
    pub fn file_name(&self, count: usize) -> String {
        format!("{}-{}-images.pdf", self.file_prefix, count)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layout: PageLayout::a4(),
            file_prefix: "badgekit".to_string(),
            annotate: true,
        }
    }
}

/// A finished document
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub page_count: usize,
    pub placements: Vec<Placement>,
}

/// Drives packing and encoding for a queue
#[derive(Debug, Clone, Default)]
pub struct ExportPipeline {
    options: ExportOptions,
}

impl ExportPipeline {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Text printed on the first page
    pub fn annotation(count: usize) -> String {
        format!("BadgeKit: {} designs", count)
    }

    /// Pack the queue and encode it with `encoder`.
    pub fn export<E: DocumentEncoder>(
        &self,
        queue: &DesignQueue,
        encoder: &mut E,
    ) -> Result<ExportedDocument> {
        let layout = self.options.layout;
        let placements = ShelfPacker::new(layout).place_queue(queue)?;
        let pages = page_count(&placements);

        for _ in 0..pages {
            encoder.add_page(layout.page_width_mm, layout.page_height_mm);
        }

        for (item, placement) in queue.items().iter().zip(&placements) {
            encoder.draw_image(
                placement.page_index,
                item.raster(),
                placement.x_mm,
                placement.y_mm,
                item.width_mm(),
                item.height_mm(),
            )?;
        }

        if self.options.annotate && pages > 0 {
            encoder.draw_text(
                0,
                &Self::annotation(queue.len()),
                ANNOTATION_X_MM,
                ANNOTATION_Y_MM,
                ANNOTATION_SIZE_PT,
                ANNOTATION_GRAY,
            )?;
        }

        let bytes = encoder.finish()?;
        let file_name = self.options.file_name(queue.len());
        tracing::info!(
            "Exported {} designs on {} page(s) as {} ({} bytes)",
            queue.len(),
            pages,
            file_name,
            bytes.len()
        );

        Ok(ExportedDocument {
            bytes,
            file_name,
            page_count: pages,
            placements,
        })
    }
}
