//! Longitudinal force model for the six-wheeled rover.
//!
//! Sign convention: positive force points up-slope in the direction of
//! travel. Drive force is positive, gravity is negative on an up-slope,
//! and rolling resistance opposes the current direction of motion.

use rover_core::constants::WHEEL_COUNT;
use thiserror::Error;

use crate::spec::{PlanetSpec, RollingResistance, RoverSpec, TerrainAngle};

/// Gain of the `erf` soft-sign used to smooth the rolling resistance
/// reversal around zero velocity. Large enough that the force is fully
/// developed within a few mm/s, small enough to keep the net-force curve
/// differentiable for the bisection solver.
pub const ROLLING_SMOOTHING_GAIN: f64 = 40.0;

/// Elementwise evaluation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DynamicsError {
    #[error("shaft speed and terrain angle slices must match in length ({omega} vs {terrain})")]
    LengthMismatch { omega: usize, terrain: usize },
}

/// Combined propulsive force (N) from all six wheels at shaft speed
/// `omega_rad_s`.
pub fn drive(omega_rad_s: f64, rover: &RoverSpec) -> f64 {
    let assembly = rover.wheel_assembly();
    let tau = assembly.motor().torque(omega_rad_s);
    let ng = assembly.speed_reducer().gear_ratio();
    WHEEL_COUNT as f64 * tau * ng / assembly.wheel().radius_m()
}

/// Gravity component along the slope (N); negative on an up-slope.
pub fn gravity(angle: TerrainAngle, rover: &RoverSpec, planet: &PlanetSpec) -> f64 {
    -rover.total_mass_kg() * planet.gravity_m_s2() * angle.radians().sin()
}

/// Rolling resistance force (N) opposing the direction of travel.
///
/// The Coulomb-like term `Crr * N` is scaled by `erf(40 * v)` so the
/// force reverses smoothly with the sign of the rover velocity instead
/// of jumping at v = 0.
pub fn rolling(
    omega_rad_s: f64,
    angle: TerrainAngle,
    rover: &RoverSpec,
    planet: &PlanetSpec,
    crr: RollingResistance,
) -> f64 {
    let wheel_radius = rover.wheel_assembly().wheel().radius_m();
    let velocity = omega_rad_s * wheel_radius;
    let normal = rover.total_mass_kg() * planet.gravity_m_s2() * angle.radians().cos();
    -libm::erf(ROLLING_SMOOTHING_GAIN * velocity) * crr.value() * normal
}

/// Net longitudinal force (N): drive + gravity + rolling resistance.
///
/// This is the function whose root in `omega_rad_s` (for a fixed slope
/// and Crr) is the rover's terminal shaft speed.
pub fn net(
    omega_rad_s: f64,
    angle: TerrainAngle,
    rover: &RoverSpec,
    planet: &PlanetSpec,
    crr: RollingResistance,
) -> f64 {
    drive(omega_rad_s, rover)
        + gravity(angle, rover, planet)
        + rolling(omega_rad_s, angle, rover, planet, crr)
}

/// Elementwise [`drive`] over a slice of shaft speeds.
pub fn drive_many(omega_rad_s: &[f64], rover: &RoverSpec) -> Vec<f64> {
    omega_rad_s.iter().map(|&w| drive(w, rover)).collect()
}

/// Elementwise [`gravity`] over a slice of terrain angles.
pub fn gravity_many(angles: &[TerrainAngle], rover: &RoverSpec, planet: &PlanetSpec) -> Vec<f64> {
    angles.iter().map(|&a| gravity(a, rover, planet)).collect()
}

/// Elementwise [`rolling`] over paired shaft-speed and angle slices.
pub fn rolling_many(
    omega_rad_s: &[f64],
    angles: &[TerrainAngle],
    rover: &RoverSpec,
    planet: &PlanetSpec,
    crr: RollingResistance,
) -> Result<Vec<f64>, DynamicsError> {
    check_lengths(omega_rad_s, angles)?;
    Ok(omega_rad_s
        .iter()
        .zip(angles)
        .map(|(&w, &a)| rolling(w, a, rover, planet, crr))
        .collect())
}

/// Elementwise [`net`] over paired shaft-speed and angle slices.
pub fn net_many(
    omega_rad_s: &[f64],
    angles: &[TerrainAngle],
    rover: &RoverSpec,
    planet: &PlanetSpec,
    crr: RollingResistance,
) -> Result<Vec<f64>, DynamicsError> {
    check_lengths(omega_rad_s, angles)?;
    Ok(omega_rad_s
        .iter()
        .zip(angles)
        .map(|(&w, &a)| net(w, a, rover, planet, crr))
        .collect())
}

fn check_lengths(omega_rad_s: &[f64], angles: &[TerrainAngle]) -> Result<(), DynamicsError> {
    if omega_rad_s.len() != angles.len() {
        return Err(DynamicsError::LengthMismatch {
            omega: omega_rad_s.len(),
            terrain: angles.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{
        MotorSpec, ReducerKind, SpeedReducerSpec, WheelAssembly, WheelSpec,
    };

    fn reference_rover() -> RoverSpec {
        let wheel = WheelSpec::new(0.3, 1.0).unwrap();
        let reducer = SpeedReducerSpec::new(ReducerKind::Reverted, 0.04, 0.07, 1.5).unwrap();
        let motor = MotorSpec::new(170.0, 0.0, 3.8, 5.0).unwrap();
        RoverSpec::new(WheelAssembly::new(wheel, reducer, motor), 659.0, 75.0, 90.0).unwrap()
    }

    fn mars() -> PlanetSpec {
        PlanetSpec::new(3.72).unwrap()
    }

    #[test]
    fn drive_at_stall_matches_hand_calculation() {
        let rover = reference_rover();
        // 6 * 170 Nm * 3.0625 / 0.3 m
        let expected = 6.0 * 170.0 * 3.0625 / 0.3;
        assert!((drive(0.0, &rover) - expected).abs() < 1e-9);
    }

    #[test]
    fn drive_vanishes_at_no_load_speed() {
        let rover = reference_rover();
        assert!(drive(3.8, &rover).abs() < 1e-9);
    }

    #[test]
    fn gravity_retards_on_up_slope_and_assists_downhill() {
        let rover = reference_rover();
        let planet = mars();
        let up = gravity(TerrainAngle::from_degrees(10.0).unwrap(), &rover, &planet);
        let down = gravity(TerrainAngle::from_degrees(-10.0).unwrap(), &rover, &planet);
        assert!(up < 0.0);
        assert!(down > 0.0);
        assert!((up + down).abs() < 1e-9);
    }

    #[test]
    fn gravity_magnitude_on_flat_ground_is_zero() {
        let rover = reference_rover();
        let flat = TerrainAngle::from_degrees(0.0).unwrap();
        assert_eq!(gravity(flat, &rover, &mars()), 0.0);
    }

    #[test]
    fn rolling_opposes_forward_motion() {
        let rover = reference_rover();
        let planet = mars();
        let flat = TerrainAngle::from_degrees(0.0).unwrap();
        let crr = RollingResistance::from_coefficient(0.15).unwrap();
        assert!(rolling(1.0, flat, &rover, &planet, crr) < 0.0);
        assert!(rolling(-1.0, flat, &rover, &planet, crr) > 0.0);
        assert_eq!(rolling(0.0, flat, &rover, &planet, crr), 0.0);
    }

    #[test]
    fn rolling_saturates_to_coulomb_value_at_speed() {
        let rover = reference_rover();
        let planet = mars();
        let flat = TerrainAngle::from_degrees(0.0).unwrap();
        let crr = RollingResistance::from_coefficient(0.15).unwrap();
        let coulomb = crr.value() * rover.total_mass_kg() * planet.gravity_m_s2();
        let developed = rolling(1.0, flat, &rover, &planet, crr);
        assert!((developed.abs() - coulomb).abs() / coulomb < 1e-6);
    }

    #[test]
    fn net_force_strictly_decreasing_on_moderate_slope() {
        let rover = reference_rover();
        let planet = mars();
        let angle = TerrainAngle::from_degrees(5.0).unwrap();
        let crr = RollingResistance::from_coefficient(0.1).unwrap();
        let mut prev = net(0.01, angle, &rover, &planet, crr);
        for i in 2..=100 {
            let omega = 3.8 * i as f64 / 100.0;
            let f = net(omega, angle, &rover, &planet, crr);
            assert!(f < prev, "net force not decreasing at omega={omega}");
            prev = f;
        }
    }

    #[test]
    fn elementwise_lengths_must_match() {
        let rover = reference_rover();
        let planet = mars();
        let crr = RollingResistance::from_coefficient(0.15).unwrap();
        let angles = [TerrainAngle::from_degrees(0.0).unwrap()];
        let err = net_many(&[0.0, 1.0], &angles, &rover, &planet, crr).unwrap_err();
        assert_eq!(err, DynamicsError::LengthMismatch { omega: 2, terrain: 1 });
    }

    #[test]
    fn elementwise_matches_scalar_evaluation() {
        let rover = reference_rover();
        let planet = mars();
        let crr = RollingResistance::from_coefficient(0.2).unwrap();
        let omegas = [0.0, 1.0, 2.0, 3.8];
        let angles: Vec<TerrainAngle> = [0.0, 5.0, -5.0, 20.0]
            .iter()
            .map(|&d| TerrainAngle::from_degrees(d).unwrap())
            .collect();
        let batch = net_many(&omegas, &angles, &rover, &planet, crr).unwrap();
        for (i, &omega) in omegas.iter().enumerate() {
            assert_eq!(batch[i], net(omega, angles[i], &rover, &planet, crr));
        }
    }
}
