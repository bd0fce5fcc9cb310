use crate::error::{SolverError, SolverResult};

/// Flat index for cells guaranteed in-bounds (`x < width`, `y < height`).
#[inline(always)]
pub const fn idx_inner(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Index of the lower neighbour along one axis, clamped at 0.
#[inline(always)]
pub const fn lower(i: usize) -> usize {
    i.saturating_sub(1)
}

/// Index of the upper neighbour along one axis, clamped at `len - 1`.
#[inline(always)]
pub fn upper(i: usize, len: usize) -> usize {
    (i + 1).min(len - 1)
}

/// Dense velocity/pressure fields plus per-step scratch buffers.
///
/// All buffers hold `width * height` values in row-major order.
pub struct GridState {
    width: usize,
    height: usize,
    h: f64,
    tau: f64,
    pub(crate) vx: Vec<f64>,
    pub(crate) vy: Vec<f64>,
    pub(crate) pressure: Vec<f64>,
    /// Convective-term estimate, x component.
    pub(crate) conv_x: Vec<f64>,
    /// Convective-term estimate, y component.
    pub(crate) conv_y: Vec<f64>,
    pub(crate) divergence: Vec<f64>,
    /// Write targets for the double-buffered sweeps.
    pub(crate) pressure_next: Vec<f64>,
    pub(crate) vx_next: Vec<f64>,
    pub(crate) vy_next: Vec<f64>,
}

impl GridState {
    /// Zero-initialised grid of `width x height` cells.
    pub fn new(width: usize, height: usize, h: f64, tau: f64) -> SolverResult<Self> {
        check_dims(width, height)?;
        let n = width * height;
        Ok(Self::assemble(width, height, h, tau, vec![0.0; n], vec![0.0; n], vec![0.0; n]))
    }

    /// Adopt caller-supplied fields. The buffers are moved in, not copied;
    /// read them back through [`GridState::vx`] and friends.
    pub fn from_fields(
        width: usize,
        height: usize,
        vx: Vec<f64>,
        vy: Vec<f64>,
        pressure: Vec<f64>,
        h: f64,
        tau: f64,
    ) -> SolverResult<Self> {
        check_dims(width, height)?;
        let expected = width * height;
        for (name, field) in [("vx", &vx), ("vy", &vy), ("pressure", &pressure)] {
            if field.len() != expected {
                return Err(SolverError::FieldSizeMismatch {
                    name,
                    expected,
                    actual: field.len(),
                });
            }
        }
        Ok(Self::assemble(width, height, h, tau, vx, vy, pressure))
    }

    fn assemble(
        width: usize,
        height: usize,
        h: f64,
        tau: f64,
        vx: Vec<f64>,
        vy: Vec<f64>,
        pressure: Vec<f64>,
    ) -> Self {
        let n = width * height;
        Self {
            width,
            height,
            h,
            tau,
            vx,
            vy,
            pressure,
            conv_x: vec![0.0; n],
            conv_y: vec![0.0; n],
            divergence: vec![0.0; n],
            pressure_next: vec![0.0; n],
            vx_next: vec![0.0; n],
            vy_next: vec![0.0; n],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid step.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Time step.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vx(&self) -> &[f64] {
        &self.vx
    }

    pub fn vy(&self) -> &[f64] {
        &self.vy
    }

    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    /// Velocity x component at a cell inside the grid.
    pub fn vx_at(&self, x: usize, y: usize) -> f64 {
        self.vx[self.index(x, y)]
    }

    /// Velocity y component at a cell inside the grid.
    pub fn vy_at(&self, x: usize, y: usize) -> f64 {
        self.vy[self.index(x, y)]
    }

    /// Pressure at a cell inside the grid.
    pub fn pressure_at(&self, x: usize, y: usize) -> f64 {
        self.pressure[self.index(x, y)]
    }

    #[inline(always)]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        idx_inner(x, y, self.width)
    }

    /// Zero velocity (and pressure when `with_pressure`) over the closed
    /// rectangle `[x1, x2] x [y1, y2]`, clipped to the grid.
    pub(crate) fn zero_closed(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, with_pressure: bool) {
        let x_hi = x2.min(self.width - 1);
        let y_hi = y2.min(self.height - 1);
        for j in y1..=y_hi {
            for i in x1..=x_hi {
                let ii = idx_inner(i, j, self.width);
                self.vx[ii] = 0.0;
                self.vy[ii] = 0.0;
                if with_pressure {
                    self.pressure[ii] = 0.0;
                }
            }
        }
    }
}

fn check_dims(width: usize, height: usize) -> SolverResult<()> {
    if width == 0 || height == 0 {
        return Err(SolverError::InvalidGridDimension { width, height });
    }
    Ok(())
}
