use std::path::PathBuf;

use thiserror::Error;

use crate::polygon::Point;

/// Result type alias for operations that may fail with [`TagTraceError`].
pub type TagTraceResult<T> = std::result::Result<T, TagTraceError>;

/// Error types that can occur while building, tracing or serializing tags.
///
/// This enum covers errors from image I/O, bitmap construction, contour
/// extraction, family loading and command-line value parsing.
#[derive(Debug, Error)]
pub enum TagTraceError {
    /// Image loading, decoding, or encoding error.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Family file could not be decoded.
    #[error("Invalid family JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Pixel buffer length does not match the requested dimensions.
    #[error("Invalid bitmap shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// A bitmap with no pixels cannot be traced.
    #[error("Bitmap must have a non-zero size, got {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },
    /// The boundary tracer exceeded its step ceiling without closing the contour.
    #[error("Contour starting at {start} did not close within {limit} steps")]
    TracerStalled { start: Point, limit: usize },
    /// Rendering the extracted contours does not reproduce the source bitmap.
    #[error("Contours do not reproduce the bitmap: first mismatch at ({x}, {y})")]
    RoundTripMismatch { x: u32, y: u32 },
    /// No family file exists for the requested name.
    #[error("Unknown family '{name}' (looked for {})", path.display())]
    UnknownFamily { name: String, path: PathBuf },
    /// Family definition is internally inconsistent.
    #[error("Invalid family definition: {0}")]
    InvalidFamily(String),
    /// Requested code index is not part of the family.
    #[error("Code index {index} is out of range (family has {count} codes)")]
    CodeOutOfRange { index: usize, count: usize },
    /// Code range text could not be parsed.
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    /// Family block text could not be parsed.
    #[error("Invalid family block: {0}")]
    InvalidFamilyBlock(String),
    /// Size text could not be parsed.
    #[error("Invalid size: {0}")]
    InvalidSize(String),
}
