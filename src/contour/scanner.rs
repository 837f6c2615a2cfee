use tracing::{debug, debug_span};

use crate::bitmap::Bitmap;
use crate::config::ExtractionOptions;
use crate::polygon::{ContourSet, Point, Polygon};
use crate::TagTraceResult;

use super::tracer::trace;
use super::visit::VisitState;

/// Extract the contours of a bitmap with the default options.
pub fn extract(bitmap: &Bitmap) -> TagTraceResult<ContourSet> {
    extract_with(bitmap, &ExtractionOptions::default())
}

/// Extract every closed contour of a bitmap.
///
/// Pixels are scanned once in row-major order; an unvisited pixel whose
/// left neighbour has a different color starts a new contour, traced with
/// that pixel's color as the inside color. Polygons are returned in
/// discovery order, so enclosing contours always precede the holes they
/// contain.
pub fn extract_with(bitmap: &Bitmap, options: &ExtractionOptions) -> TagTraceResult<ContourSet> {
    bitmap.ensure_not_empty()?;

    let (width, height) = bitmap.dimensions();
    let _span = debug_span!("extract", width, height).entered();
    let step_limit = options.step_limit_for(width, height);
    let mut visited = VisitState::new(width, height);
    let mut polygons = Vec::new();

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let p = Point::new(x, y);
            if visited.is_visited(p) {
                continue;
            }
            visited.mark(p);

            let inside = bitmap.color_at(p);
            if bitmap.color_at(p + Point::new(-1, 0)) == inside {
                continue;
            }

            let vertices = trace(bitmap, &mut visited, p, inside, step_limit)?;
            debug!(start = %p, color = ?inside, vertices = vertices.len(), "traced contour");
            polygons.push(Polygon::new(inside, vertices));
        }
    }

    debug!(contours = polygons.len(), "extraction complete");
    Ok(ContourSet::new(width, height, polygons))
}
