use ndarray::Array2;

use crate::polygon::Point;

/// Per-pixel visit counters for one extraction pass.
///
/// A pixel is consumed once its counter is non-zero. Counters rather than
/// flags: a pixel can be marked both as a step point and as the corner
/// skipped by a left-turn jump.
#[derive(Debug, Clone)]
pub struct VisitState {
    counts: Array2<u32>,
}

impl VisitState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            counts: Array2::zeros((height as usize, width as usize)),
        }
    }

    /// Pixels outside the grid count as visited.
    pub fn is_visited(&self, p: Point) -> bool {
        self.index(p).is_none_or(|idx| self.counts[idx] > 0)
    }

    /// Bump the counter of an in-bounds pixel; out-of-bounds marks are dropped.
    pub fn mark(&mut self, p: Point) {
        if let Some(idx) = self.index(p) {
            self.counts[idx] = self.counts[idx].saturating_add(1);
        }
    }

    pub fn count(&self, p: Point) -> u32 {
        self.index(p).map_or(0, |idx| self.counts[idx])
    }

    fn index(&self, p: Point) -> Option<[usize; 2]> {
        let (h, w) = self.counts.dim();
        if p.x < 0 || p.y < 0 || p.x as usize >= w || p.y as usize >= h {
            return None;
        }
        Some([p.y as usize, p.x as usize])
    }
}
