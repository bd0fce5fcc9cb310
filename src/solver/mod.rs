mod boundary;
pub mod channel;
mod core;
pub mod diagnostics;
mod obstacle;
mod params;
mod rect;

// Re-export public API
pub use boundary::{parabolic_profile, BoundaryRecord, BoundaryRegistry, ConditionKind};
pub use self::core::Relaxation;
pub use obstacle::ObstacleMask;
pub use params::SolverParams;
pub use rect::Rect;

use tracing::{debug, info, warn};

use crate::error::{SolverError, SolverResult};
use crate::state::{idx_inner, GridState};
use boundary::{apply_outflow, write_inflow_profile};
use self::core::{convective_estimate, divergence, integrate_velocity, relax_pressure};

/// Per-step status returned by [`Simulation::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// 1-based index of the step just completed.
    pub step: u64,
    pub sweeps: usize,
    pub residual: f64,
    /// False when relaxation stopped at the sweep cap. Fields are still
    /// updated with the best pressure estimate.
    pub converged: bool,
}

/// Grid state plus obstacle and boundary registries, stepped by
/// [`Simulation::advance`].
pub struct Simulation {
    state: GridState,
    obstacles: ObstacleMask,
    boundaries: BoundaryRegistry,
    params: SolverParams,
    /// Cached `is_simulated && classify == None`, rebuilt on registration.
    eligible: Vec<bool>,
    steps: u64,
}

impl Simulation {
    pub fn new(width: usize, height: usize, h: f64, tau: f64, params: SolverParams) -> SolverResult<Self> {
        let state = GridState::new(width, height, h, tau)?;
        Ok(Self::with_state(state, params))
    }

    /// Start from caller-supplied fields (moved in).
    pub fn from_fields(
        width: usize,
        height: usize,
        vx: Vec<f64>,
        vy: Vec<f64>,
        pressure: Vec<f64>,
        h: f64,
        tau: f64,
        params: SolverParams,
    ) -> SolverResult<Self> {
        let state = GridState::from_fields(width, height, vx, vy, pressure, h, tau)?;
        Ok(Self::with_state(state, params))
    }

    fn with_state(state: GridState, params: SolverParams) -> Self {
        let eligible = vec![true; state.len()];
        Self {
            state,
            obstacles: ObstacleMask::new(),
            boundaries: BoundaryRegistry::new(),
            params,
            eligible,
            steps: 0,
        }
    }

    /// Exclude a rectangle from the simulation and zero its velocity and
    /// pressure.
    pub fn register_obstacle(&mut self, rect: Rect) -> SolverResult<()> {
        ObstacleMask::validate(&rect, self.state.width(), self.state.height())?;
        self.obstacles.push(rect);
        self.state.zero_closed(rect.x1, rect.y1, rect.x2, rect.y2, true);
        self.rebuild_eligible();
        info!(%rect, count = self.obstacles.len(), "obstacle registered");
        Ok(())
    }

    /// Register a boundary without an inflow profile. `SolidWall` zeroes
    /// velocity over the rectangle immediately.
    pub fn register_boundary(&mut self, rect: Rect, kind: ConditionKind) -> SolverResult<()> {
        BoundaryRegistry::validate(&rect, kind, self.state.width(), self.state.height())?;
        self.boundaries.push(BoundaryRecord { rect, kind, peak_velocity: None });
        if kind == ConditionKind::SolidWall {
            self.state.zero_closed(rect.x1, rect.y1, rect.x2, rect.y2, false);
        }
        self.rebuild_eligible();
        info!(%rect, ?kind, "boundary registered");
        Ok(())
    }

    /// Register a boundary and write a parabolic velocity profile along it.
    /// The rectangle must be a row or column at least two cells long.
    pub fn register_inflow_boundary(&mut self, rect: Rect, kind: ConditionKind, peak: f64) -> SolverResult<()> {
        BoundaryRegistry::validate(&rect, kind, self.state.width(), self.state.height())?;
        if !rect.is_segment() {
            return Err(SolverError::InvalidRectangle {
                rect,
                reason: "inflow profile needs a row or column spanning at least two cells",
            });
        }
        if kind != ConditionKind::ParabolicInflow {
            warn!(%rect, ?kind, "inflow profile written for a non-inflow boundary kind");
        }
        self.boundaries.push(BoundaryRecord { rect, kind, peak_velocity: Some(peak) });
        write_inflow_profile(&mut self.state, &rect, peak, &self.obstacles);
        self.rebuild_eligible();
        info!(%rect, ?kind, peak, "inflow boundary registered");
        Ok(())
    }

    pub fn is_simulated(&self, x: usize, y: usize) -> bool {
        self.obstacles.is_simulated(x, y)
    }

    pub fn classify(&self, x: usize, y: usize) -> ConditionKind {
        self.boundaries.classify(x, y)
    }

    /// Run one full step: convective estimate, divergence, pressure
    /// relaxation, velocity integration, outflow re-application.
    pub fn advance(&mut self) -> StepReport {
        let width = self.state.width();
        let height = self.state.height();
        let h = self.state.h();
        let tau = self.state.tau();
        let params = &self.params;
        let st = &mut self.state;

        convective_estimate(&mut st.conv_x, &mut st.conv_y, &st.vx, &st.vy, &self.eligible, h, width, height);
        divergence(&mut st.divergence, &st.conv_x, &st.conv_y, &self.eligible, h, width, height);
        let relax = relax_pressure(
            &mut st.pressure,
            &mut st.pressure_next,
            &st.divergence,
            &self.eligible,
            h,
            params.density,
            params.tolerance,
            params.max_sweeps,
            width,
            height,
        );
        integrate_velocity(
            &mut st.vx,
            &mut st.vy,
            &mut st.vx_next,
            &mut st.vy_next,
            &st.pressure,
            &st.conv_x,
            &st.conv_y,
            &self.eligible,
            h,
            tau,
            params.viscosity,
            params.density,
            width,
            height,
        );
        apply_outflow(st, &self.boundaries, &self.obstacles);

        self.steps += 1;
        if relax.converged {
            debug!(step = self.steps, sweeps = relax.sweeps, residual = relax.residual, "step complete");
        } else {
            warn!(
                step = self.steps,
                sweeps = relax.sweeps,
                residual = relax.residual,
                tolerance = params.tolerance,
                "pressure relaxation hit sweep cap"
            );
        }

        StepReport {
            step: self.steps,
            sweeps: relax.sweeps,
            residual: relax.residual,
            converged: relax.converged,
        }
    }

    fn rebuild_eligible(&mut self) {
        let width = self.state.width();
        for j in 0..self.state.height() {
            for i in 0..width {
                self.eligible[idx_inner(i, j, width)] =
                    self.obstacles.is_simulated(i, j) && self.boundaries.classify(i, j) == ConditionKind::None;
            }
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn obstacles(&self) -> &[Rect] {
        self.obstacles.rects()
    }

    pub fn boundaries(&self) -> &[BoundaryRecord] {
        self.boundaries.records()
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Completed calls to [`Simulation::advance`].
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
