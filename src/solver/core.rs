use crate::state::{idx_inner, lower, upper};

/// Outcome of one pressure relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relaxation {
    pub sweeps: usize,
    /// Largest per-cell change in the final sweep.
    pub residual: f64,
    pub converged: bool,
}

/// Convective-term estimate with backward differences against the lower
/// x neighbour. Both velocity components weight the same x difference.
/// Cells outside `eligible` keep their previous value.
pub fn convective_estimate(
    conv_x: &mut [f64],
    conv_y: &mut [f64],
    vx: &[f64],
    vy: &[f64],
    eligible: &[bool],
    h: f64,
    width: usize,
    height: usize,
) {
    let h_inv = 1.0 / h;
    for j in 0..height {
        for i in 0..width {
            let ii = idx_inner(i, j, width);
            if !eligible[ii] {
                continue;
            }
            let im = idx_inner(lower(i), j, width);
            let dvx = (vx[ii] - vx[im]) * h_inv;
            let dvy = (vy[ii] - vy[im]) * h_inv;
            conv_x[ii] = vx[ii] * dvx + vy[ii] * dvx;
            conv_y[ii] = vx[ii] * dvy + vy[ii] * dvy;
        }
    }
}

/// Divergence of the convective estimate, backward differences in x.
pub fn divergence(
    div: &mut [f64],
    conv_x: &[f64],
    conv_y: &[f64],
    eligible: &[bool],
    h: f64,
    width: usize,
    height: usize,
) {
    let h_inv = 1.0 / h;
    for j in 0..height {
        for i in 0..width {
            let ii = idx_inner(i, j, width);
            if !eligible[ii] {
                continue;
            }
            let im = idx_inner(lower(i), j, width);
            div[ii] = (conv_x[ii] - conv_x[im]) * h_inv + (conv_y[ii] - conv_y[im]) * h_inv;
        }
    }
}

/// Jacobi relaxation of the pressure Poisson equation.
///
/// Each sweep reads `p` and writes `p_next`, then the two are swapped, so
/// the result does not depend on traversal order. Ineligible cells are
/// carried across unchanged. Stops when the largest change drops below
/// `tolerance` or after `max_sweeps` sweeps (at least one).
pub fn relax_pressure(
    p: &mut Vec<f64>,
    p_next: &mut Vec<f64>,
    div: &[f64],
    eligible: &[bool],
    h: f64,
    density: f64,
    tolerance: f64,
    max_sweeps: usize,
    width: usize,
    height: usize,
) -> Relaxation {
    let source_scale = h * h * density;
    let cap = max_sweeps.max(1);
    let mut sweeps = 0;
    let mut residual = 0.0;

    while sweeps < cap {
        p_next.copy_from_slice(p);
        let mut max_change = 0.0_f64;
        for j in 0..height {
            let jm = lower(j);
            let jp = upper(j, height);
            for i in 0..width {
                let ii = idx_inner(i, j, width);
                if !eligible[ii] {
                    continue;
                }
                let neighbors = p[idx_inner(lower(i), j, width)]
                    + p[idx_inner(upper(i, width), j, width)]
                    + p[idx_inner(i, jm, width)]
                    + p[idx_inner(i, jp, width)];
                let updated = (source_scale * div[ii] + neighbors) * 0.25;
                max_change = max_change.max((updated - p[ii]).abs());
                p_next[ii] = updated;
            }
        }
        std::mem::swap(p, p_next);
        sweeps += 1;
        residual = max_change;
        if max_change < tolerance {
            return Relaxation { sweeps, residual, converged: true };
        }
    }

    Relaxation { sweeps, residual, converged: false }
}

/// Forward-Euler velocity update: viscous diffusion, pressure gradient and
/// convective estimate. Reads `vx`/`vy`, writes `vx_next`/`vy_next`, swaps.
pub fn integrate_velocity(
    vx: &mut Vec<f64>,
    vy: &mut Vec<f64>,
    vx_next: &mut Vec<f64>,
    vy_next: &mut Vec<f64>,
    p: &[f64],
    conv_x: &[f64],
    conv_y: &[f64],
    eligible: &[bool],
    h: f64,
    tau: f64,
    viscosity: f64,
    density: f64,
    width: usize,
    height: usize,
) {
    let visc_scale = viscosity / (h * h);
    let grad_scale = 1.0 / (h * density);

    vx_next.copy_from_slice(vx);
    vy_next.copy_from_slice(vy);

    for j in 0..height {
        let jm = lower(j);
        let jp = upper(j, height);
        for i in 0..width {
            let ii = idx_inner(i, j, width);
            if !eligible[ii] {
                continue;
            }
            let l = idx_inner(lower(i), j, width);
            let r = idx_inner(upper(i, width), j, width);
            let d = idx_inner(i, jm, width);
            let u = idx_inner(i, jp, width);

            let lap_x = vx[l] + vx[r] + vx[d] + vx[u] - 4.0 * vx[ii];
            let lap_y = vy[l] + vy[r] + vy[d] + vy[u] - 4.0 * vy[ii];

            vx_next[ii] = vx[ii] + tau * (visc_scale * lap_x - (p[ii] - p[l]) * grad_scale - conv_x[ii]);
            vy_next[ii] = vy[ii] + tau * (visc_scale * lap_y - (p[ii] - p[d]) * grad_scale - conv_y[ii]);
        }
    }

    std::mem::swap(vx, vx_next);
    std::mem::swap(vy, vy_next);
}
