//! Raster-to-vector contour extraction.
//!
//! [`extract`] scans a [`Bitmap`](crate::Bitmap) for color transitions and
//! traces each one into a closed, axis-aligned [`Polygon`](crate::Polygon).
//! Filling the resulting polygons together with the even-odd rule reproduces
//! the bitmap pixel for pixel, see [`rasterize`](crate::raster::rasterize).

pub mod direction;
pub mod scanner;
pub mod tracer;
pub mod visit;

pub use direction::Direction;
pub use scanner::{extract, extract_with};
pub use visit::VisitState;
