pub mod bitmap;
pub mod config;
pub mod contour;
pub mod error;
pub mod family;
pub mod family_block;
pub mod polygon;
pub mod raster;
pub mod units;
pub mod vectorizer;

pub use bitmap::Bitmap;
pub use config::{ExtractionOptions, SvgOptions, ThresholdOptions};
pub use contour::{extract, extract_with};
pub use error::{TagTraceError, TagTraceResult};
pub use family::{Family, FamilyRegistry};
pub use family_block::{FamilyBlock, Range, parse_ranges};
pub use polygon::{Color, ContourSet, Point, Polygon};
pub use raster::{rasterize, verify_round_trip};
pub use units::Size;
pub use vectorizer::BitmapVectorizer;
pub use vectorizer::svg::{SvgVectorizer, render_svg_document, render_svg_path};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::GrayImage;

/// Environment variable naming the directory of family JSON files.
pub const ENV_FAMILY_DIR: &str = "TAGTRACE_FAMILY_DIR";

/// Entry point for configuring and running contour extraction.
#[derive(Debug, Clone, Default)]
pub struct Tracer {
    threshold: ThresholdOptions,
    extraction: ExtractionOptions,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gray level at or below which pixels count as foreground.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = self.threshold.with_threshold(threshold);
        self
    }

    /// Swap foreground and background after thresholding.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.threshold = self.threshold.with_invert(invert);
        self
    }

    /// Override the per-contour step ceiling of the boundary tracer.
    pub fn with_step_limit(mut self, step_limit: Option<usize>) -> Self {
        self.extraction = self.extraction.with_step_limit(step_limit);
        self
    }

    /// Load an image from disk and reduce it to a bitmap.
    pub fn for_image(&self, image_path: impl AsRef<Path>) -> TagTraceResult<BitmapHandle> {
        let gray = image::open(image_path.as_ref())?.to_luma8();
        Ok(self.for_gray(&gray))
    }

    /// Threshold an in-memory grayscale image into a bitmap.
    pub fn for_gray(&self, gray: &GrayImage) -> BitmapHandle {
        self.for_bitmap(Bitmap::from_gray(gray, &self.threshold))
    }

    /// Wrap an existing bitmap.
    pub fn for_bitmap(&self, bitmap: Bitmap) -> BitmapHandle {
        BitmapHandle {
            bitmap: Arc::new(bitmap),
            extraction: self.extraction.clone(),
        }
    }
}

/// A bitmap ready for contour extraction.
#[derive(Debug, Clone)]
pub struct BitmapHandle {
    bitmap: Arc<Bitmap>,
    extraction: ExtractionOptions,
}

impl BitmapHandle {
    /// Get a reference to the bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        self.bitmap.as_ref()
    }

    /// Save the bitmap as a black and white grayscale image.
    pub fn save(&self, path: impl AsRef<Path>) -> TagTraceResult<()> {
        self.bitmap.to_gray().save(path)?;
        Ok(())
    }

    /// Extract every contour of the bitmap.
    pub fn contours(&self) -> TagTraceResult<ContourHandle> {
        let contours = extract_with(self.bitmap.as_ref(), &self.extraction)?;
        Ok(ContourHandle {
            bitmap: Arc::clone(&self.bitmap),
            contours: Arc::new(contours),
        })
    }

    /// Vectorize the bitmap using the specified vectorizer and options.
    pub fn trace<V>(&self, vectorizer: &V, options: &V::Options) -> TagTraceResult<V::Output>
    where
        V: BitmapVectorizer,
    {
        vectorizer.vectorize(self.bitmap.as_ref(), options)
    }
}

/// Contours extracted from a bitmap, from which all vector artefacts are derived.
#[derive(Debug, Clone)]
pub struct ContourHandle {
    bitmap: Arc<Bitmap>,
    contours: Arc<ContourSet>,
}

impl ContourHandle {
    /// Get a reference to the source bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        self.bitmap.as_ref()
    }

    /// Get a reference to the extracted contour set.
    pub fn contours(&self) -> &ContourSet {
        self.contours.as_ref()
    }

    /// Get the polygons in discovery order.
    pub fn polygons(&self) -> &[Polygon] {
        self.contours.polygons()
    }

    /// Fill the contours back into a bitmap.
    pub fn rasterize(&self) -> Bitmap {
        rasterize(self.contours.as_ref())
    }

    /// Check that the contours reproduce the source bitmap exactly.
    pub fn verify(&self) -> TagTraceResult<()> {
        verify_round_trip(self.bitmap.as_ref(), self.contours.as_ref())
    }

    /// Serialize the contours as a standalone SVG document.
    pub fn to_svg(&self, options: &SvgOptions) -> String {
        render_svg_document(self.contours.as_ref(), options)
    }

    /// Write the SVG document to the specified path.
    pub fn save_svg(&self, path: impl AsRef<Path>, options: &SvgOptions) -> TagTraceResult<()> {
        fs::write(path, self.to_svg(options))?;
        Ok(())
    }

    /// Vectorize the source bitmap using the specified vectorizer and options.
    pub fn trace<V>(&self, vectorizer: &V, options: &V::Options) -> TagTraceResult<V::Output>
    where
        V: BitmapVectorizer,
    {
        vectorizer.vectorize(self.bitmap.as_ref(), options)
    }
}
