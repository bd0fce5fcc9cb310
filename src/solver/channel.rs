//! Channel with a rectangular cavity cut into its floor.
//!
//! Flow enters through a parabolic inflow on the left wall of the channel
//! and leaves through a zero-gradient outflow on the right. Below the
//! channel floor, everything except the cavity is solid.
//!
//! ```text
//!  inflow |==================== top wall ====================| outflow
//!         |                                                   |
//!         |======= floor =======+             +====== floor ==|
//!         ######## solid ########|   cavity   |#### solid #####
//!         ######################+=============+################
//! ```

use super::{ConditionKind, Rect, Simulation, SolverParams};
use crate::error::{SolverError, SolverResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelLayout {
    pub width: usize,
    pub height: usize,
    /// Rows occupied by the open channel; the floor wall sits on row
    /// `depth - 1`.
    pub depth: usize,
    /// First column of the cavity (left side wall).
    pub cavity_x1: usize,
    /// Last column of the cavity (right side wall).
    pub cavity_x2: usize,
    /// Peak inflow velocity at mid-channel.
    pub inflow_peak: f64,
}

impl ChannelLayout {
    /// Proportions of the 1000x500 reference layout: channel depth 3/5 of
    /// the height, cavity spanning 7/20 to 13/20 of the width.
    pub fn scaled(width: usize, height: usize, inflow_peak: f64) -> SolverResult<Self> {
        if width < 8 || height < 5 {
            return Err(SolverError::InvalidGridDimension { width, height });
        }
        let depth = (height * 3 / 5).clamp(2, height - 2);
        let cavity_x1 = (width * 7 / 20).max(1);
        let cavity_x2 = (width * 13 / 20).clamp(cavity_x1 + 1, width - 2);
        Ok(Self { width, height, depth, cavity_x1, cavity_x2, inflow_peak })
    }

    /// The 1000x500 grid with a 300-row channel and a cavity between
    /// columns 350 and 650.
    pub fn reference() -> Self {
        Self {
            width: 1000,
            height: 500,
            depth: 300,
            cavity_x1: 350,
            cavity_x2: 650,
            inflow_peak: 10.0,
        }
    }
}

/// Build a [`Simulation`] for the layout: two solid blocks either side of
/// the cavity, then inflow, outflow and walls in that order.
pub fn build(layout: &ChannelLayout, h: f64, tau: f64, params: SolverParams) -> SolverResult<Simulation> {
    let ChannelLayout { width: w, height: ht, depth, cavity_x1: cx1, cavity_x2: cx2, inflow_peak } = *layout;
    let mut sim = Simulation::new(w, ht, h, tau, params)?;

    sim.register_obstacle(Rect::new(0, depth, cx1, ht))?;
    sim.register_obstacle(Rect::new(cx2, depth, w, ht))?;

    sim.register_inflow_boundary(Rect::new(0, 0, 0, depth - 1), ConditionKind::ParabolicInflow, inflow_peak)?;
    sim.register_boundary(Rect::new(w - 1, 0, w - 1, depth - 1), ConditionKind::SimpleOutflow)?;

    let walls = [
        Rect::new(0, 0, w - 1, 0),
        Rect::new(0, depth - 1, cx1 - 1, depth - 1),
        Rect::new(cx2, depth - 1, w - 1, depth - 1),
        Rect::new(cx1, ht - 1, cx2 - 1, ht - 1),
        Rect::new(cx1, depth, cx1, ht - 1),
        Rect::new(cx2, depth, cx2, ht - 1),
    ];
    for wall in walls {
        sim.register_boundary(wall, ConditionKind::SolidWall)?;
    }

    Ok(sim)
}
