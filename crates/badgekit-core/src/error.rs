//! Error handling for BadgeKit
//!
//! Provides error types for every layer of the badge pipeline:
//! - Designer errors (session preconditions, queue operations)
//! - Render errors (canvas allocation, raster encoding)
//! - Layout errors (page packing)
//! - Export errors (document encoding)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Designer error type
///
/// Represents failures of a single user action on the editing session.
/// None of these leave the session in a modified state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// An edit or export action was invoked before any image was loaded
    #[error("No image loaded: load an image first")]
    NoImageLoaded,

    /// The requested template key is not in the catalog
    #[error("Unknown badge template: {key}")]
    UnknownTemplate {
        /// The key that was looked up.
        key: String,
    },

    /// No queue item carries the given id or index
    #[error("Queue item not found: {reference}")]
    ItemNotFound {
        /// The id or index that was requested.
        reference: String,
    },

    /// Rendering the export raster failed while adding to the queue
    #[error("Failed to add design to the queue: {message}")]
    QueueAdd {
        /// The underlying failure message.
        message: String,
    },

    /// Export was requested with an empty queue and no image loaded
    #[error("Nothing to export: add designs to the queue first")]
    NothingToExport,

    /// The source image could not be decoded
    #[error("Failed to decode image: {reason}")]
    ImageDecode {
        /// The decoder's message.
        reason: String,
    },
}

/// Render error type
///
/// Represents failures while rasterizing a badge canvas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Canvas dimensions are zero or too large to allocate
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The source bitmap could not be converted for drawing
    #[error("Invalid source image: {reason}")]
    InvalidSource {
        /// Why the source was rejected.
        reason: String,
    },

    /// A boundary path could not be built
    #[error("Failed to build {shape} boundary path")]
    PathBuild {
        /// Shape kind name.
        shape: String,
    },

    /// Encoding the finished raster failed
    #[error("Failed to encode raster: {reason}")]
    Encode {
        /// The encoder's message.
        reason: String,
    },
}

/// Layout error type
///
/// Represents invalid inputs to the page packing algorithm.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Page parameters leave no usable interior
    #[error("Invalid page: {reason}")]
    InvalidPage {
        /// Why the page was rejected.
        reason: String,
    },

    /// An item does not fit the page interior in one or both dimensions
    #[error("Item {index} ({width}x{height}mm) exceeds page interior {max_width}x{max_height}mm")]
    ItemTooLarge {
        /// Position of the item in the input sequence.
        index: usize,
        /// Item width in millimeters.
        width: f64,
        /// Item height in millimeters.
        height: f64,
        /// Usable interior width in millimeters.
        max_width: f64,
        /// Usable interior height in millimeters.
        max_height: f64,
    },
}

/// Export error type
///
/// Represents failures while producing the final document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// A queued raster could not be decoded for embedding
    #[error("Failed to read queued raster: {reason}")]
    Image {
        /// The decoder's message.
        reason: String,
    },

    /// The document encoder failed
    #[error("Document encoding failed: {reason}")]
    Encode {
        /// The encoder's message.
        reason: String,
    },

    /// Drawing targeted a page that was never started
    #[error("Page {index} was never started")]
    NoPage {
        /// The requested page index.
        index: usize,
    },
}

/// Main error type for BadgeKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Designer error
    #[error(transparent)]
    Designer(#[from] DesignerError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error is a missing-image precondition failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Designer(DesignerError::NoImageLoaded))
    }

    /// Check if this is a render error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
