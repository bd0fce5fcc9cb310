/// Fluid constants and pressure-relaxation controls.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Fluid density (kg/m^3).
    pub density: f64,
    /// Kinematic viscosity (m^2/s).
    pub viscosity: f64,
    /// Relaxation stops once no eligible cell changes by this much in a sweep.
    pub tolerance: f64,
    /// Hard cap on relaxation sweeps per step.
    pub max_sweeps: usize,
}

impl Default for SolverParams {
    /// Water at room temperature.
    fn default() -> Self {
        Self {
            density: 1000.0,
            viscosity: 1.006e-6,
            tolerance: 1e-3,
            max_sweeps: 10_000,
        }
    }
}

impl SolverParams {
    /// Same fluid, different relaxation controls.
    pub fn with_relaxation(tolerance: f64, max_sweeps: usize) -> Self {
        Self {
            tolerance,
            max_sweeps: max_sweeps.max(1),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_water() {
        let p = SolverParams::default();
        assert_eq!(p.density, 1000.0);
        assert_eq!(p.viscosity, 1.006e-6);
        assert_eq!(p.tolerance, 1e-3);
        assert!(p.max_sweeps > 0);
    }

    #[test]
    fn test_with_relaxation_keeps_fluid() {
        let p = SolverParams::with_relaxation(1e-6, 0);
        assert_eq!(p.max_sweeps, 1, "at least one sweep");
        assert_eq!(p.density, 1000.0);
        assert_eq!(p.tolerance, 1e-6);
    }
}
