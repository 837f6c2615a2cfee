use crate::bitmap::Bitmap;
use crate::polygon::{Color, Point};
use crate::{TagTraceError, TagTraceResult};

use super::direction::Direction;
use super::visit::VisitState;

/// Walk one closed contour, starting on `start` facing up.
///
/// The region of `inside` color that contains `start` is kept on the
/// tracer's right while its complement is kept on the left. Every step
/// marks the current pixel and the pixel on its left in `visited`; a left
/// turn also marks the front pixel it jumps over. Returns the corner
/// vertices in walk order, without repeating the first one.
///
/// Fails with [`TagTraceError::TracerStalled`] when more than `step_limit`
/// loop iterations pass without the contour closing.
pub fn trace(
    bitmap: &Bitmap,
    visited: &mut VisitState,
    start: Point,
    inside: Color,
    step_limit: usize,
) -> TagTraceResult<Vec<Point>> {
    let is_inside = |p: Point| bitmap.color_at(p) == inside;

    let mut pos = start;
    let mut direction = Direction::UP;
    let mut vertices: Vec<Point> = Vec::new();

    for _ in 0..step_limit {
        let front = pos + direction.front();
        let front_left = front + direction.left();
        let front_is_inside = is_inside(front);
        let front_left_is_inside = is_inside(front_left);

        visited.mark(pos);
        visited.mark(pos + direction.left());

        if front_is_inside && !front_left_is_inside {
            pos = front;
            continue;
        }

        let vertex = pos + direction.vertex_offset();
        if vertices.first() == Some(&vertex) {
            return Ok(vertices);
        }
        vertices.push(vertex);

        if front_is_inside {
            direction = direction.turn_left();
            pos = front_left;
            visited.mark(front);
        } else {
            direction = direction.turn_right();
        }
    }

    Err(TagTraceError::TracerStalled {
        start,
        limit: step_limit,
    })
}
