use std::fmt;
use std::ops::Add;

/// One of the two levels a traced bitmap can hold.
///
/// Foreground is the ink (black on a printed tag), background is the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Foreground,
    #[default]
    Background,
}

impl Color {
    /// The other level.
    pub fn inverted(self) -> Self {
        match self {
            Color::Foreground => Color::Background,
            Color::Background => Color::Foreground,
        }
    }
}

/// An integer lattice point. Pixel `(x, y)` spans the corners `(x, y)` to `(x + 1, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A closed, axis-aligned outline.
///
/// The loop closes implicitly from the last vertex back to the first; the
/// first vertex is never repeated at the end. `color` is the color of the
/// pixel the contour was started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub color: Color,
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(color: Color, vertices: Vec<Point>) -> Self {
        Self { color, vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate the edges of the closed loop, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// True when every edge, closing edge included, moves along exactly one axis.
    pub fn is_axis_aligned(&self) -> bool {
        self.edges()
            .all(|(a, b)| (a.x == b.x) != (a.y == b.y))
    }

    /// Lattice bounding box as `(min, max)` corners, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        let bounds = self.vertices.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some(bounds)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = match self.color {
            Color::Foreground => "foreground",
            Color::Background => "background",
        };
        write!(f, "{color}:")?;
        for v in &self.vertices {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

/// The ordered polygons extracted from one bitmap, in contour discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContourSet {
    width: u32,
    height: u32,
    polygons: Vec<Polygon>,
}

impl ContourSet {
    pub fn new(width: u32, height: u32, polygons: Vec<Polygon>) -> Self {
        Self {
            width,
            height,
            polygons,
        }
    }

    /// Size of the bitmap the contours were extracted from.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }
}

impl<'a> IntoIterator for &'a ContourSet {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32) -> Polygon {
        Polygon::new(
            Color::Foreground,
            vec![
                Point::new(x, y),
                Point::new(x + 1, y),
                Point::new(x + 1, y + 1),
                Point::new(x, y + 1),
            ],
        )
    }

    mod is_axis_aligned {
        use super::*;

        #[test]
        fn unit_square_is_aligned() {
            assert!(square(0, 0).is_axis_aligned());
        }

        #[test]
        fn diagonal_closing_edge_is_rejected() {
            let poly = Polygon::new(
                Color::Foreground,
                vec![Point::new(0, 0), Point::new(2, 0), Point::new(2, 1)],
            );
            assert!(!poly.is_axis_aligned());
        }

        #[test]
        fn repeated_vertex_is_rejected() {
            let poly = Polygon::new(
                Color::Foreground,
                vec![
                    Point::new(0, 0),
                    Point::new(0, 0),
                    Point::new(1, 0),
                    Point::new(1, 1),
                    Point::new(0, 1),
                ],
            );
            assert!(!poly.is_axis_aligned());
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn square_bounds() {
            let (lo, hi) = square(2, 3).bounds().unwrap();
            assert_eq!(lo, Point::new(2, 3));
            assert_eq!(hi, Point::new(3, 4));
        }

        #[test]
        fn empty_polygon_has_no_bounds() {
            assert!(Polygon::new(Color::Background, Vec::new()).bounds().is_none());
        }
    }

    #[test]
    fn display_lists_color_and_vertices() {
        assert_eq!(
            square(0, 0).to_string(),
            "foreground: (0, 0) (1, 0) (1, 1) (0, 1)"
        );
    }

    #[test]
    fn point_addition() {
        assert_eq!(Point::new(1, -2) + Point::new(3, 4), Point::new(4, 2));
    }

    #[test]
    fn color_inversion() {
        assert_eq!(Color::Foreground.inverted(), Color::Background);
        assert_eq!(Color::Background.inverted(), Color::Foreground);
    }
}
