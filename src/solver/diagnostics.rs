use super::Simulation;
use crate::state::{idx_inner, lower, upper};

/// Mean kinetic energy over simulated cells: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(sim: &Simulation) -> f64 {
    let st = sim.state();
    let (vx, vy) = (st.vx(), st.vy());
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 0..st.height() {
        for i in 0..st.width() {
            if !sim.is_simulated(i, j) {
                continue;
            }
            let ii = idx_inner(i, j, st.width());
            sum += vx[ii] * vx[ii] + vy[ii] * vy[ii];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

/// Largest |div v| over simulated cells, central differences with clamped
/// edges.
pub fn max_divergence(sim: &Simulation) -> f64 {
    let st = sim.state();
    let (w, h) = (st.width(), st.height());
    let (vx, vy) = (st.vx(), st.vy());
    let scale = 0.5 / st.h();
    let mut max = 0.0_f64;
    for j in 0..h {
        for i in 0..w {
            if !sim.is_simulated(i, j) {
                continue;
            }
            let d = (vx[idx_inner(upper(i, w), j, w)] - vx[idx_inner(lower(i), j, w)]
                + vy[idx_inner(i, upper(j, h), w)]
                - vy[idx_inner(i, lower(j), w)])
                * scale;
            max = max.max(d.abs());
        }
    }
    max
}

/// Smallest and largest velocity component magnitude over simulated cells,
/// the range a renderer normalises against. `None` if every cell is masked.
pub fn speed_range(sim: &Simulation) -> Option<(f64, f64)> {
    let st = sim.state();
    let mut range: Option<(f64, f64)> = None;
    for j in 0..st.height() {
        for i in 0..st.width() {
            if !sim.is_simulated(i, j) {
                continue;
            }
            let ii = idx_inner(i, j, st.width());
            for v in [st.vx()[ii].abs(), st.vy()[ii].abs()] {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
    }
    range
}
