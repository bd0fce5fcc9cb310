use super::rect::Rect;
use crate::error::{SolverError, SolverResult};

/// Rectangles of cells excluded from the simulation.
#[derive(Debug, Clone, Default)]
pub struct ObstacleMask {
    rects: Vec<Rect>,
}

impl ObstacleMask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check an obstacle against a `width x height` grid. The upper corner
    /// may sit one past the last cell so an obstacle can run flush to the
    /// far edge.
    pub fn validate(rect: &Rect, width: usize, height: usize) -> SolverResult<()> {
        if !rect.is_ordered() {
            return Err(SolverError::InvalidRectangle { rect: *rect, reason: "corners out of order" });
        }
        if rect.x1 >= width || rect.y1 >= height || rect.x2 > width || rect.y2 > height {
            return Err(SolverError::InvalidRectangle { rect: *rect, reason: "outside grid bounds" });
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    /// False iff the point lies inside the closed rectangle of any obstacle.
    pub fn is_simulated(&self, x: usize, y: usize) -> bool {
        !self.rects.iter().any(|r| r.contains(x, y))
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
