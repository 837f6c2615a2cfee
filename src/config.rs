use crate::units::Size;

/// Options for contour extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOptions {
    /// Maximum tracer loop iterations for a single contour.
    /// `None` uses a ceiling derived from the bitmap size.
    pub step_limit: Option<usize>,
}

impl ExtractionOptions {
    /// Create extraction options with the size-derived step ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-contour step ceiling.
    pub fn with_step_limit(mut self, step_limit: Option<usize>) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Resolve the step ceiling for a bitmap of the given size.
    ///
    /// A closed contour walks each lattice edge at most once and turns at
    /// most twice on each lattice corner, so `8 * (w + 1) * (h + 1)` is never
    /// reached by a terminating trace.
    pub fn step_limit_for(&self, width: u32, height: u32) -> usize {
        self.step_limit.unwrap_or_else(|| {
            8usize
                .saturating_mul(width as usize + 1)
                .saturating_mul(height as usize + 1)
        })
    }
}

/// Options describing how a grayscale raster is reduced to two levels.
#[derive(Debug, Clone)]
pub struct ThresholdOptions {
    /// Gray values at or below this level are foreground (ink).
    pub threshold: u8,
    /// Swap foreground and background after thresholding.
    pub invert: bool,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: 127,
            invert: false,
        }
    }
}

impl ThresholdOptions {
    /// Set the gray threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set whether foreground and background are swapped.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Options for serializing contours to SVG.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// RGBA fill of the foreground path.
    pub foreground: [u8; 4],
    /// RGBA fill of a full-size background rectangle, painted first when set.
    pub background: Option<[u8; 4]>,
    /// Output pixels per bitmap pixel when no physical size is set.
    pub scale: u32,
    /// Physical document size in millimetres, overriding the pixel size.
    pub physical_size_mm: Option<Size>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            foreground: [0, 0, 0, 255],
            background: None,
            scale: 1,
            physical_size_mm: None,
        }
    }
}

impl SvgOptions {
    /// Set the foreground fill color.
    pub fn with_foreground(mut self, color: [u8; 4]) -> Self {
        self.foreground = color;
        self
    }

    /// Set or clear the background fill color.
    pub fn with_background(mut self, color: Option<[u8; 4]>) -> Self {
        self.background = color;
        self
    }

    /// Set the pixel scale factor, clamped to at least 1.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Size the document in millimetres instead of pixels.
    pub fn with_physical_size_mm(mut self, size_mm: Option<Size>) -> Self {
        self.physical_size_mm = size_mm;
        self
    }
}
