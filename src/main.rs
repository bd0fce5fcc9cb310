use std::process::ExitCode;

use channelflow::config;
use channelflow::solver::channel::{self, ChannelLayout};
use channelflow::solver::diagnostics::{kinetic_energy, max_divergence, speed_range};
use channelflow::SolverResult;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> SolverResult<()> {
    let cfg = config::load();
    let layout = ChannelLayout::scaled(cfg.grid.width, cfg.grid.height, cfg.grid.inflow_peak)?;
    info!(?layout, h = cfg.grid.h, tau = cfg.grid.tau, "building channel");

    let mut sim = channel::build(&layout, cfg.grid.h, cfg.grid.tau, cfg.physics.solver_params())?;
    let log_every = cfg.run.log_every.max(1);
    let mut unconverged = 0usize;

    for _ in 0..cfg.run.steps {
        let report = sim.advance();
        if !report.converged {
            unconverged += 1;
        }
        if report.step as usize % log_every == 0 {
            let (lo, hi) = speed_range(&sim).unwrap_or((0.0, 0.0));
            info!(
                step = report.step,
                sweeps = report.sweeps,
                residual = report.residual,
                ke = kinetic_energy(&sim),
                max_div = max_divergence(&sim),
                speed_min = lo,
                speed_max = hi,
                "step"
            );
        }
    }

    info!(steps = sim.steps(), unconverged, "done");
    Ok(())
}
