//! # BadgeKit Designer
//!
//! Positions a photo inside a die-cut badge template and turns queued
//! designs into a printable document.
//!
//! ## Core Components
//!
//! ### Geometry
//! - **Templates**: Built-in badge blanks (circles, heart) with visible and bleed sizes
//! - **Shapes**: One boundary path provider shared by every caller
//! - **Geometry**: Canvas size, image placement and cover-fit scale
//! - **Viewport**: Pan and zoom of the source image
//!
//! ### Rendering
//! - **Renderer**: Editor preview and masked export rasters (tiny-skia)
//!
//! ### Output
//! - **Queue**: Rendered designs waiting for export
//! - **Packing**: Greedy shelf layout onto fixed-size pages
//! - **Export**: Document encoder seam and the export pipeline
//! - **PDF**: lopdf-backed encoder
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (one session)
//!   ├── Viewport (pan / zoom)
//!   ├── CanvasGeometry (template at a resolution)
//!   │     └── BoundaryPath (visible, bleed)
//!   ├── MaskRenderer (preview / export)
//!   └── DesignQueue
//!         └── ExportPipeline → ShelfPacker → DocumentEncoder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use badgekit_designer::{DesignerOptions, DesignerState};
//!
//! let mut state = DesignerState::new(DesignerOptions::default())?;
//! state.open_image("photo.jpg".as_ref())?;
//! state.select_template("heart")?;
//! state.set_zoom(1.4)?;
//! state.add_to_queue()?;
//! let document = state.export_pdf()?;
//! std::fs::write(&document.file_name, &document.bytes)?;
//! ```

pub mod commands;
pub mod designer_state;
pub mod export;
pub mod geometry;
pub mod packing;
pub mod pdf;
pub mod queue;
pub mod renderer;
pub mod shapes;
pub mod templates;
pub mod viewport;

// Re-export all public types from submodules
pub use commands::QueueCommand;
pub use designer_state::{DesignerOptions, DesignerState};
pub use export::{DocumentEncoder, ExportOptions, ExportPipeline, ExportedDocument};
pub use geometry::{cover_fit_scale, CanvasGeometry, ImagePlacement};
pub use packing::{page_count, ItemSize, PageLayout, PagePosition, Placement, ShelfPacker};
pub use pdf::PdfEncoder;
pub use queue::{DesignQueue, QueueItem};
pub use renderer::{MaskRenderer, RenderMode, RenderStyle, SourceImage};
pub use shapes::{BoundaryPath, ShapeKind};
pub use templates::{BadgeTemplate, TemplateCatalog, DEFAULT_TEMPLATE_KEY};
pub use viewport::{DragTracker, Viewport};
