//! # Page Packing Module
//!
//! Lays queued badges out on fixed-size paper pages.
//!
//! Greedy shelf packing: items are placed left to right in queue order,
//! wrapping to a new row when the current one is full and to a new page
//! when the next row would run past the bottom margin. The layout never
//! reorders items, so the same queue always produces the same placements.

use badgekit_core::constants::{A4_HEIGHT_MM, A4_WIDTH_MM, ITEM_GAP_MM, PAGE_MARGIN_MM};
use badgekit_core::LayoutError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::queue::DesignQueue;

/// Page parameters for a layout, all in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page width (mm)
    pub page_width_mm: f64,
    /// Page height (mm)
    pub page_height_mm: f64,
    /// Margin on every side (mm)
    pub margin_mm: f64,
    /// Gap between neighbouring items, both across and down (mm)
    pub item_gap_mm: f64,
}

impl PageLayout {
    /// Create new page parameters
    pub fn new(page_width_mm: f64, page_height_mm: f64, margin_mm: f64, item_gap_mm: f64) -> Self {
        Self {
            page_width_mm,
            page_height_mm,
            margin_mm,
            item_gap_mm,
        }
    }

    /// A4 portrait with the default margin and gap
    pub fn a4() -> Self {
        Self::new(A4_WIDTH_MM, A4_HEIGHT_MM, PAGE_MARGIN_MM, ITEM_GAP_MM)
    }

    /// Usable area inside the margins as `(width, height)`
    pub fn interior(&self) -> (f64, f64) {
        (
            self.page_width_mm - 2.0 * self.margin_mm,
            self.page_height_mm - 2.0 * self.margin_mm,
        )
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<(), LayoutError> {
        let all_finite = [
            self.page_width_mm,
            self.page_height_mm,
            self.margin_mm,
            self.item_gap_mm,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(invalid_page("page parameters must be finite"));
        }
        if self.page_width_mm <= 0.0 || self.page_height_mm <= 0.0 {
            return Err(invalid_page(format!(
                "page size {}x{}mm must be positive",
                self.page_width_mm, self.page_height_mm
            )));
        }
        if self.margin_mm < 0.0 || self.item_gap_mm < 0.0 {
            return Err(invalid_page(format!(
                "margin {}mm and gap {}mm must not be negative",
                self.margin_mm, self.item_gap_mm
            )));
        }
        let (width, height) = self.interior();
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid_page(format!(
                "margin {}mm leaves no printable area",
                self.margin_mm
            )));
        }
        Ok(())
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

fn invalid_page(reason: impl Into<String>) -> LayoutError {
    LayoutError::InvalidPage {
        reason: reason.into(),
    }
}

/// Physical size of one item to place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl ItemSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }
}

/// Where one item lands: page and offset from the page's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePosition {
    /// Zero-based page number
    pub page_index: usize,
    /// Horizontal offset (mm)
    pub x_mm: f64,
    /// Vertical offset from the top edge (mm)
    pub y_mm: f64,
}

/// A queue item's position in the output document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: Uuid,
    pub page_index: usize,
    pub x_mm: f64,
    pub y_mm: f64,
}

impl Placement {
    fn new(item_id: Uuid, position: PagePosition) -> Self {
        Self {
            item_id,
            page_index: position.page_index,
            x_mm: position.x_mm,
            y_mm: position.y_mm,
        }
    }
}

/// Greedy row-by-row packer
#[derive(Debug, Clone, Default)]
pub struct ShelfPacker {
    layout: PageLayout,
}

impl ShelfPacker {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Place `items` in order. Returns one position per item.
    pub fn pack(&self, items: &[ItemSize]) -> Result<Vec<PagePosition>, LayoutError> {
        self.layout.validate()?;
        let (max_width, max_height) = self.layout.interior();
        for (index, item) in items.iter().enumerate() {
            let fits = item.width_mm.is_finite()
                && item.height_mm.is_finite()
                && item.width_mm <= max_width
                && item.height_mm <= max_height;
            if !fits {
                return Err(LayoutError::ItemTooLarge {
                    index,
                    width: item.width_mm,
                    height: item.height_mm,
                    max_width,
                    max_height,
                });
            }
        }

        let PageLayout {
            page_width_mm,
            page_height_mm,
            margin_mm,
            item_gap_mm,
        } = self.layout;

        let mut positions = Vec::with_capacity(items.len());
        let mut x = margin_mm;
        let mut y = margin_mm;
        let mut row_max_height: f64 = 0.0;
        let mut page_index = 0;

        for item in items {
            if x + item.width_mm > page_width_mm - margin_mm {
                x = margin_mm;
                y += row_max_height + item_gap_mm;
                row_max_height = 0.0;
            }

            if y + item.height_mm > page_height_mm - margin_mm {
                page_index += 1;
                x = margin_mm;
                y = margin_mm;
                row_max_height = 0.0;
            }

            positions.push(PagePosition {
                page_index,
                x_mm: x,
                y_mm: y,
            });

            x += item.width_mm + item_gap_mm;
            row_max_height = row_max_height.max(item.height_mm);
        }

        Ok(positions)
    }

    /// Place every item of a queue, in queue order
    pub fn place_queue(&self, queue: &DesignQueue) -> Result<Vec<Placement>, LayoutError> {
        let positions = self.pack(&queue.sizes())?;
        let placements: Vec<Placement> = queue
            .items()
            .iter()
            .zip(positions)
            .map(|(item, position)| Placement::new(item.id(), position))
            .collect();
        tracing::debug!(
            "Packed {} items onto {} page(s)",
            placements.len(),
            page_count(&placements)
        );
        Ok(placements)
    }
}

/// Number of pages a set of placements spans
pub fn page_count(placements: &[Placement]) -> usize {
    placements
        .iter()
        .map(|p| p.page_index + 1)
        .max()
        .unwrap_or(0)
}
