use std::fmt::Write as _;

use crate::TagTraceResult;
use crate::bitmap::Bitmap;
use crate::config::{ExtractionOptions, SvgOptions};
use crate::contour::extract_with;
use crate::polygon::{ContourSet, Point};

use super::BitmapVectorizer;

/// Vectorizer that extracts contours and serializes them as an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgVectorizer {
    pub extraction: ExtractionOptions,
}

impl BitmapVectorizer for SvgVectorizer {
    type Options = SvgOptions;
    type Output = String;

    fn vectorize(&self, bitmap: &Bitmap, options: &Self::Options) -> TagTraceResult<Self::Output> {
        let contours = extract_with(bitmap, &self.extraction)?;
        Ok(render_svg_document(&contours, options))
    }
}

/// Format an RGBA color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn color_to_hex([r, g, b, a]: [u8; 4]) -> String {
    if a == 0xff {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Build the `d` attribute for one closed polygon: `M x0 y0 L x1 y1 x2 y2 ... z`.
///
/// Fewer than three points do not enclose anything and yield an empty string.
pub fn build_svg_path_data(points: &[Point]) -> String {
    if points.len() < 3 {
        return String::new();
    }
    let coords: Vec<String> = points.iter().map(|p| format!("{} {}", p.x, p.y)).collect();
    format!(
        "M{} {} z",
        coords[..2].join(" L"),
        coords[2..].join(" ")
    )
}

/// Render every polygon into a single even-odd `<path>` element.
///
/// Nested polygons alternate coverage under the even-odd rule, so one path
/// filled with the foreground color reproduces the bitmap regardless of the
/// per-polygon color tags. An empty set renders nothing.
pub fn render_svg_path(contours: &ContourSet, options: &SvgOptions) -> String {
    if contours.is_empty() {
        return String::new();
    }
    let data: Vec<String> = contours
        .iter()
        .map(|polygon| build_svg_path_data(&polygon.vertices))
        .filter(|d| !d.is_empty())
        .collect();
    format!(
        r#"<path d="{}" style="fill:{};fill-rule:evenodd"/>"#,
        data.join(" "),
        color_to_hex(options.foreground)
    )
}

/// Render a standalone SVG document whose view box matches the bitmap lattice.
pub fn render_svg_document(contours: &ContourSet, options: &SvgOptions) -> String {
    let (w, h) = contours.dimensions();
    let (width, height) = match options.physical_size_mm {
        Some(size) => (format!("{}mm", size.width), format!("{}mm", size.height)),
        None => (
            (w as u64 * options.scale as u64).to_string(),
            (h as u64 * options.scale as u64).to_string(),
        ),
    };

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    // Writing to a String never fails.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {w} {h}">"#
    );
    if let Some(background) = options.background {
        let _ = writeln!(
            out,
            r#"<rect x="0" y="0" width="{w}" height="{h}" style="fill:{}"/>"#,
            color_to_hex(background)
        );
    }
    let path = render_svg_path(contours, options);
    if !path.is_empty() {
        out.push_str(&path);
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}
