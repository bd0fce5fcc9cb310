use super::obstacle::ObstacleMask;
use super::rect::Rect;
use crate::error::{SolverError, SolverResult};
use crate::state::{idx_inner, GridState};

/// Boundary condition attached to a rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionKind {
    /// Not a boundary; the cell is solved normally.
    #[default]
    None,
    /// Fixed parabolic velocity profile written at registration.
    ParabolicInflow,
    /// Zero-gradient outflow: copies the interior neighbour every step.
    SimpleOutflow,
    /// No-slip wall: velocity zeroed at registration.
    SolidWall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryRecord {
    pub rect: Rect,
    pub kind: ConditionKind,
    pub peak_velocity: Option<f64>,
}

/// Boundary records in registration order.
#[derive(Debug, Clone, Default)]
pub struct BoundaryRegistry {
    records: Vec<BoundaryRecord>,
}

impl BoundaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a boundary rectangle against a `width x height` grid. Every
    /// corner must name an existing cell.
    pub fn validate(rect: &Rect, kind: ConditionKind, width: usize, height: usize) -> SolverResult<()> {
        if !rect.is_ordered() {
            return Err(SolverError::InvalidRectangle { rect: *rect, reason: "corners out of order" });
        }
        if rect.x2 >= width || rect.y2 >= height {
            return Err(SolverError::InvalidRectangle { rect: *rect, reason: "outside grid bounds" });
        }
        if kind == ConditionKind::SimpleOutflow {
            if !rect.is_vertical() && !rect.is_horizontal() {
                return Err(SolverError::InvalidRectangle { rect: *rect, reason: "outflow must be a single row or column" });
            }
            if rect.is_vertical() && rect.x1 == 0 && width < 2 {
                return Err(SolverError::OutOfRangeAccess { rect: *rect, reason: "no interior column to copy from" });
            }
            if !rect.is_vertical() && rect.y1 == 0 && height < 2 {
                return Err(SolverError::OutOfRangeAccess { rect: *rect, reason: "no interior row to copy from" });
            }
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, record: BoundaryRecord) {
        self.records.push(record);
    }

    /// Kind of the last registered record whose closed rectangle holds the
    /// point, or [`ConditionKind::None`].
    pub fn classify(&self, x: usize, y: usize) -> ConditionKind {
        self.records
            .iter()
            .rev()
            .find(|r| r.rect.contains(x, y))
            .map_or(ConditionKind::None, |r| r.kind)
    }

    pub fn records(&self) -> &[BoundaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parabolic profile over a segment of `span` cells: zero at both ends,
/// `peak` at mid-span. `t` is the offset from the segment start.
pub fn parabolic_profile(peak: f64, t: usize, span: usize) -> f64 {
    let t = t as f64;
    let s = span as f64;
    -4.0 * peak * t * t / (s * s) + 4.0 * peak * t / s
}

/// Write the inflow profile over a validated segment. A vertical segment
/// drives `vx`, a horizontal one drives `vy`; the other component is zeroed.
/// Cells under an obstacle are left at zero.
pub fn write_inflow_profile(state: &mut GridState, rect: &Rect, peak: f64, obstacles: &ObstacleMask) {
    let width = state.width();
    if rect.is_vertical() {
        let span = rect.y2 - rect.y1;
        for j in rect.y1..=rect.y2 {
            if !obstacles.is_simulated(rect.x1, j) {
                continue;
            }
            let ii = idx_inner(rect.x1, j, width);
            state.vx[ii] = parabolic_profile(peak, j - rect.y1, span);
            state.vy[ii] = 0.0;
        }
    } else {
        let span = rect.x2 - rect.x1;
        for i in rect.x1..=rect.x2 {
            if !obstacles.is_simulated(i, rect.y1) {
                continue;
            }
            let ii = idx_inner(i, rect.y1, width);
            state.vx[ii] = 0.0;
            state.vy[ii] = parabolic_profile(peak, i - rect.x1, span);
        }
    }
}

/// Re-apply per-step boundary conditions, one record at a time.
/// Only `SimpleOutflow` does anything here: each simulated cell of the
/// segment that still classifies as outflow takes the velocity of its
/// interior neighbour. Cells claimed by a later record are left alone.
pub fn apply_outflow(state: &mut GridState, boundaries: &BoundaryRegistry, obstacles: &ObstacleMask) {
    let width = state.width();
    for record in boundaries.records() {
        if record.kind != ConditionKind::SimpleOutflow {
            continue;
        }
        let r = record.rect;
        if r.is_vertical() {
            // Left edge reads inward from column 1; anything else reads from the column before it.
            let src_x = if r.x1 == 0 { 1 } else { r.x1 - 1 };
            for j in r.y1..=r.y2 {
                if !obstacles.is_simulated(r.x1, j) || boundaries.classify(r.x1, j) != ConditionKind::SimpleOutflow {
                    continue;
                }
                copy_velocity(state, idx_inner(src_x, j, width), idx_inner(r.x1, j, width));
            }
        } else {
            let src_y = if r.y1 == 0 { 1 } else { r.y1 - 1 };
            for i in r.x1..=r.x2 {
                if !obstacles.is_simulated(i, r.y1) || boundaries.classify(i, r.y1) != ConditionKind::SimpleOutflow {
                    continue;
                }
                copy_velocity(state, idx_inner(i, src_y, width), idx_inner(i, r.y1, width));
            }
        }
    }
}

#[inline]
fn copy_velocity(state: &mut GridState, from: usize, to: usize) {
    state.vx[to] = state.vx[from];
    state.vy[to] = state.vy[from];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rect: Rect, kind: ConditionKind) -> BoundaryRecord {
        BoundaryRecord { rect, kind, peak_velocity: None }
    }

    #[test]
    fn test_classify_last_match_wins() {
        let mut reg = BoundaryRegistry::new();
        reg.push(record(Rect::new(0, 0, 5, 5), ConditionKind::SolidWall));
        reg.push(record(Rect::new(3, 3, 8, 8), ConditionKind::SimpleOutflow));
        assert_eq!(reg.classify(4, 4), ConditionKind::SimpleOutflow, "overlap takes later record");
        assert_eq!(reg.classify(1, 1), ConditionKind::SolidWall);
        assert_eq!(reg.classify(8, 8), ConditionKind::SimpleOutflow, "closed upper corner");
        assert_eq!(reg.classify(9, 9), ConditionKind::None);
    }

    #[test]
    fn test_parabolic_profile_shape() {
        assert_eq!(parabolic_profile(10.0, 0, 10), 0.0);
        assert!(parabolic_profile(10.0, 10, 10).abs() < 1e-12);
        assert!((parabolic_profile(10.0, 5, 10) - 10.0).abs() < 1e-12, "peak at mid-span");
        assert!(parabolic_profile(10.0, 2, 10) < parabolic_profile(10.0, 4, 10));
    }

    #[test]
    fn test_validate_outflow_shapes() {
        let k = ConditionKind::SimpleOutflow;
        assert!(BoundaryRegistry::validate(&Rect::new(9, 0, 9, 4), k, 10, 5).is_ok());
        assert!(matches!(
            BoundaryRegistry::validate(&Rect::new(0, 0, 3, 3), k, 10, 5),
            Err(SolverError::InvalidRectangle { .. })
        ));
        assert!(matches!(
            BoundaryRegistry::validate(&Rect::new(0, 0, 0, 4), k, 1, 5),
            Err(SolverError::OutOfRangeAccess { .. })
        ));
        assert!(matches!(
            BoundaryRegistry::validate(&Rect::new(0, 0, 0, 5), ConditionKind::SolidWall, 10, 5),
            Err(SolverError::InvalidRectangle { .. })
        ));
    }

    #[test]
    fn test_outflow_copies_interior_neighbour_both_edges() {
        let (w, h) = (6, 4);
        let vx: Vec<f64> = (0..w * h).map(|i| (i % w) as f64).collect();
        let mut state = GridState::from_fields(w, h, vx, vec![0.5; w * h], vec![0.0; w * h], 1.0, 1.0).unwrap();
        let mut reg = BoundaryRegistry::new();
        reg.push(record(Rect::new(0, 0, 0, h - 1), ConditionKind::SimpleOutflow));
        reg.push(record(Rect::new(w - 1, 0, w - 1, h - 1), ConditionKind::SimpleOutflow));
        apply_outflow(&mut state, &reg, &ObstacleMask::new());
        for j in 0..h {
            assert_eq!(state.vx_at(0, j), 1.0, "left edge copies column 1 at y={}", j);
            assert_eq!(state.vx_at(w - 1, j), (w - 2) as f64, "right edge copies column w-2 at y={}", j);
        }
    }

    #[test]
    fn test_outflow_horizontal_bottom_edge() {
        let (w, h) = (4, 5);
        let vy: Vec<f64> = (0..w * h).map(|i| (i / w) as f64).collect();
        let mut state = GridState::from_fields(w, h, vec![0.0; w * h], vy, vec![0.0; w * h], 1.0, 1.0).unwrap();
        let mut reg = BoundaryRegistry::new();
        reg.push(record(Rect::new(0, h - 1, w - 1, h - 1), ConditionKind::SimpleOutflow));
        apply_outflow(&mut state, &reg, &ObstacleMask::new());
        for i in 0..w {
            assert_eq!(state.vy_at(i, h - 1), (h - 2) as f64);
        }
    }

    #[test]
    fn test_outflow_yields_to_later_record() {
        let (w, h) = (4, 4);
        let mut state = GridState::from_fields(w, h, vec![2.0; w * h], vec![2.0; w * h], vec![0.0; w * h], 1.0, 1.0).unwrap();
        state.vx[idx_inner(3, 2, w)] = 0.0;
        state.vy[idx_inner(3, 2, w)] = 0.0;
        let mut reg = BoundaryRegistry::new();
        reg.push(record(Rect::new(3, 0, 3, 3), ConditionKind::SimpleOutflow));
        reg.push(record(Rect::new(3, 2, 3, 2), ConditionKind::SolidWall));
        apply_outflow(&mut state, &reg, &ObstacleMask::new());
        assert_eq!(state.vx_at(3, 2), 0.0, "wall registered later keeps its zero velocity");
        assert_eq!(state.vy_at(3, 2), 0.0);
        assert_eq!(state.vx_at(3, 1), 2.0);
    }

    #[test]
    fn test_outflow_skips_obstacle_cells() {
        let (w, h) = (4, 4);
        let mut state = GridState::from_fields(w, h, vec![2.0; w * h], vec![0.0; w * h], vec![0.0; w * h], 1.0, 1.0).unwrap();
        state.vx[idx_inner(3, 0, w)] = 0.0;
        let mut reg = BoundaryRegistry::new();
        reg.push(record(Rect::new(3, 0, 3, 3), ConditionKind::SimpleOutflow));
        let mut obstacles = ObstacleMask::new();
        obstacles.push(Rect::new(3, 0, 3, 0));
        apply_outflow(&mut state, &reg, &obstacles);
        assert_eq!(state.vx_at(3, 0), 0.0, "obstacle cell untouched");
        assert_eq!(state.vx_at(3, 1), 2.0);
    }
}
