//! Parameter sweeps over the terminal-speed solver.
//!
//! Each grid cell is an independent bisection solve; cells without an
//! equilibrium are recorded as NaN and never abort the rest of the sweep.

use serde::Serialize;

use rover_dynamics::{PlanetSpec, RollingResistance, RoverSpec, TerrainAngle};
use rover_solver::{BisectionSettings, terminal_speed};

/// Result surface of a 2-D sweep: one row per terrain angle, one column
/// per rolling resistance coefficient. NaN marks cells with no root.
#[derive(Debug, Clone, Serialize)]
pub struct SpeedSurface {
    pub terrain_angles_deg: Vec<f64>,
    pub crr_values: Vec<f64>,
    pub speeds_m_s: Vec<Vec<f64>>,
}

impl SpeedSurface {
    /// Terminal speed at `(angle row, crr column)`, `None` for no-root cells.
    pub fn speed_at(&self, angle_idx: usize, crr_idx: usize) -> Option<f64> {
        let v = *self.speeds_m_s.get(angle_idx)?.get(crr_idx)?;
        v.is_finite().then_some(v)
    }
}

fn cell(
    rover: &RoverSpec,
    planet: &PlanetSpec,
    angle: TerrainAngle,
    crr: RollingResistance,
    settings: &BisectionSettings,
) -> f64 {
    terminal_speed(rover, planet, angle, crr, settings).unwrap_or(f64::NAN)
}

/// Terminal speed versus terrain slope at a fixed rolling resistance.
pub fn sweep_terrain(
    rover: &RoverSpec,
    planet: &PlanetSpec,
    angles: &[TerrainAngle],
    crr: RollingResistance,
    settings: &BisectionSettings,
) -> Vec<f64> {
    angles
        .iter()
        .map(|&angle| cell(rover, planet, angle, crr, settings))
        .collect()
}

/// Terminal speed versus rolling resistance at a fixed terrain slope.
pub fn sweep_rolling(
    rover: &RoverSpec,
    planet: &PlanetSpec,
    angle: TerrainAngle,
    crr_values: &[RollingResistance],
    settings: &BisectionSettings,
) -> Vec<f64> {
    crr_values
        .iter()
        .map(|&crr| cell(rover, planet, angle, crr, settings))
        .collect()
}

/// Full Cartesian sweep over terrain slope and rolling resistance.
pub fn sweep_grid(
    rover: &RoverSpec,
    planet: &PlanetSpec,
    angles: &[TerrainAngle],
    crr_values: &[RollingResistance],
    settings: &BisectionSettings,
) -> SpeedSurface {
    let speeds_m_s = angles
        .iter()
        .map(|&angle| {
            crr_values
                .iter()
                .map(|&crr| cell(rover, planet, angle, crr, settings))
                .collect()
        })
        .collect();

    SpeedSurface {
        terrain_angles_deg: angles.iter().map(|a| a.degrees()).collect(),
        crr_values: crr_values.iter().map(|c| c.value()).collect(),
        speeds_m_s,
    }
}
