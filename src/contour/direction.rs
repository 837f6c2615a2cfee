use crate::polygon::Point;

/// Tracer facing, an index into the fixed tables below.
///
/// `0 = up`, `1 = right`, `2 = down`, `3 = left`; indices are kept mod 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction(u8);

/// Unit step in the direction of travel, per direction index.
const FRONT_STEP: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Unit step to the tracer's left, per direction index.
const LEFT_STEP: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
];

/// Pixel corner emitted as a vertex while facing each direction.
const VERTEX_OFFSET: [Point; 4] = [
    Point::new(0, 0),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
];

impl Direction {
    pub const UP: Direction = Direction(0);
    pub const RIGHT: Direction = Direction(1);
    pub const DOWN: Direction = Direction(2);
    pub const LEFT: Direction = Direction(3);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Rotate 90 degrees counter-clockwise.
    pub fn turn_left(self) -> Direction {
        Direction((self.0 + 3) % 4)
    }

    /// Rotate 90 degrees clockwise.
    pub fn turn_right(self) -> Direction {
        Direction((self.0 + 1) % 4)
    }

    pub fn front(self) -> Point {
        FRONT_STEP[self.index()]
    }

    pub fn left(self) -> Point {
        LEFT_STEP[self.index()]
    }

    /// Offset from a pixel's top-left corner to the vertex emitted when
    /// standing on that pixel with this facing.
    pub fn vertex_offset(self) -> Point {
        VERTEX_OFFSET[self.index()]
    }
}
