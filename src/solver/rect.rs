use std::fmt;

/// Axis-aligned cell rectangle. Corners are inclusive unless a caller says
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Rect {
    pub const fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Closed-interval membership: `x1 <= x <= x2 && y1 <= y <= y2`.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Single column (includes the single-cell case).
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    /// Single row.
    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    /// A line one cell thick with at least two cells.
    pub fn is_segment(&self) -> bool {
        (self.is_vertical() && self.y2 > self.y1) || (self.is_horizontal() && self.x2 > self.x1)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_closed() {
        let r = Rect::new(2, 3, 5, 7);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 7));
        assert!(!r.contains(5, 8));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_segment_shapes() {
        assert!(Rect::new(5, 0, 5, 10).is_segment());
        assert!(Rect::new(0, 4, 9, 4).is_segment());
        assert!(!Rect::new(3, 3, 3, 3).is_segment(), "single cell has no span");
        assert!(!Rect::new(0, 0, 2, 2).is_segment());
        assert!(!Rect::new(4, 0, 2, 2).is_ordered());
    }
}
