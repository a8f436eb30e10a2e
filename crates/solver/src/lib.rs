//! Terminal-speed solver: bracketed bisection on the net longitudinal force.
//!
//! The net force is strictly decreasing in shaft speed over the motor's
//! operating range, so at most one root lies inside the bracket
//! `[0, no-load speed]`. Absence of a sign change is a legitimate domain
//! outcome (the slope is unsustainable, or the rover never balances) and is
//! reported as [`TerminalSolution::NoRoot`], never as an error.

use rover_dynamics::forces;
use rover_dynamics::{PlanetSpec, RollingResistance, RoverSpec, TerrainAngle};

/// Outcome of one terminal-speed solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalSolution {
    /// Root found to within tolerance; shaft speed in rad/s.
    Converged(f64),
    /// Iteration budget exhausted; best midpoint so far, still usable.
    Exhausted(f64),
    /// No sign change in the bracket; no equilibrium in range.
    NoRoot,
}

impl TerminalSolution {
    /// Shaft speed of the solution, if any root was bracketed.
    pub fn omega_rad_s(self) -> Option<f64> {
        match self {
            Self::Converged(omega) | Self::Exhausted(omega) => Some(omega),
            Self::NoRoot => None,
        }
    }

    pub fn is_root(self) -> bool {
        !matches!(self, Self::NoRoot)
    }
}

/// Bisection controls. Defaults match the reference analysis scripts.
#[derive(Debug, Clone, Copy)]
pub struct BisectionSettings {
    /// Convergence tolerance on both |F_net| and the half bracket width.
    pub tol: f64,
    /// Hard iteration cap; guarantees bounded work per cell.
    pub max_iter: usize,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iter: 200,
        }
    }
}

/// Find the shaft speed at which the net longitudinal force is zero.
///
/// Brackets over `[0, no-load speed]`. Exact zeros at either bracket end
/// are returned immediately as converged boundary roots.
pub fn solve_terminal_omega(
    rover: &RoverSpec,
    planet: &PlanetSpec,
    angle: TerrainAngle,
    crr: RollingResistance,
    settings: &BisectionSettings,
) -> TerminalSolution {
    let omega_lo = 0.0;
    let omega_hi = rover.wheel_assembly().motor().no_load_speed_rad_s();

    let f_lo = forces::net(omega_lo, angle, rover, planet, crr);
    let f_hi = forces::net(omega_hi, angle, rover, planet, crr);

    if f_lo == 0.0 {
        return TerminalSolution::Converged(omega_lo);
    }
    if f_hi == 0.0 {
        return TerminalSolution::Converged(omega_hi);
    }
    if f_lo * f_hi > 0.0 {
        return TerminalSolution::NoRoot;
    }

    let (mut a, mut b) = (omega_lo, omega_hi);
    let mut f_a = f_lo;

    for _ in 0..settings.max_iter {
        let c = 0.5 * (a + b);
        let f_c = forces::net(c, angle, rover, planet, crr);

        if f_c.abs() < settings.tol || 0.5 * (b - a) < settings.tol {
            return TerminalSolution::Converged(c);
        }

        if f_a * f_c < 0.0 {
            b = c;
        } else {
            a = c;
            f_a = f_c;
        }
    }

    TerminalSolution::Exhausted(0.5 * (a + b))
}

/// Terminal rover speed in m/s, or `None` when no equilibrium exists in
/// the motor's operating range.
pub fn terminal_speed(
    rover: &RoverSpec,
    planet: &PlanetSpec,
    angle: TerrainAngle,
    crr: RollingResistance,
    settings: &BisectionSettings,
) -> Option<f64> {
    solve_terminal_omega(rover, planet, angle, crr, settings)
        .omega_rad_s()
        .map(|omega| rover.shaft_speed_to_rover_speed(omega))
}
