//! Pressure-projection solver for incompressible 2D flow on a fixed grid
//! with rectangular obstacles and boundary conditions.

pub mod config;
pub mod error;
pub mod solver;
pub mod state;

pub use error::{SolverError, SolverResult};
pub use solver::{BoundaryRecord, ConditionKind, Rect, Simulation, SolverParams, StepReport};
pub use state::GridState;
