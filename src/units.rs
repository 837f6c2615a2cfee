use std::fmt;
use std::str::FromStr;

use crate::TagTraceError;

const MM_PER_INCH: f64 = 25.4;

/// Convert a length in printer dots to millimetres.
pub fn pixel_to_mm(dpi: u32, pixels: f64) -> f64 {
    pixels * MM_PER_INCH / dpi as f64
}

/// Convert a length in millimetres to the nearest whole number of printer dots.
pub fn mm_to_pixel(dpi: u32, mm: f64) -> u32 {
    (mm * dpi as f64 / MM_PER_INCH).round().max(0.0) as u32
}

/// A physical sheet or tag size, written `<width>x<height>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = TagTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| TagTraceError::InvalidSize(format!("'{s}': {reason}"));
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| invalid("format needs to be <width>x<height>".to_string()))?;
        if h.contains('x') {
            return Err(invalid("format needs to be <width>x<height>".to_string()));
        }
        let width = w.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
        let height = h.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
        Ok(Size { width, height })
    }
}
