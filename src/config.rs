use serde::Deserialize;
use tracing::warn;

use crate::solver::SolverParams;

pub const CONFIG_FILE: &str = "channelflow.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    pub run: RunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Grid step.
    pub h: f64,
    /// Time step.
    pub tau: f64,
    pub inflow_peak: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub density: f64,
    pub viscosity: f64,
    pub tolerance: f64,
    pub max_sweeps: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub steps: usize,
    pub log_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            physics: PhysicsConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            h: 0.01,
            tau: 0.1,
            inflow_peak: 10.0,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let p = SolverParams::default();
        Self {
            density: p.density,
            viscosity: p.viscosity,
            tolerance: p.tolerance,
            max_sweeps: p.max_sweeps,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { steps: 5, log_every: 1 }
    }
}

impl PhysicsConfig {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            density: self.density,
            viscosity: self.viscosity,
            tolerance: self.tolerance,
            max_sweeps: self.max_sweeps.max(1),
        }
    }
}

pub fn load() -> Config {
    let path = std::path::Path::new(CONFIG_FILE);
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("failed to parse {CONFIG_FILE}: {e}; using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                warn!("failed to read {CONFIG_FILE}: {e}; using defaults");
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}
