//! Sampled drivetrain performance curves for reporting and plotting.

use rover_core::grid::linspace;

use crate::spec::{MotorSpec, WheelAssembly};

/// One sample of a torque-speed-power characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub omega_rad_s: f64,
    pub torque_nm: f64,
    pub power_w: f64,
}

/// Motor shaft characteristic sampled from zero to no-load speed.
pub fn motor_curve(motor: &MotorSpec, samples: usize) -> Vec<CurveSample> {
    linspace(0.0, motor.no_load_speed_rad_s(), samples)
        .into_iter()
        .map(|omega| CurveSample {
            omega_rad_s: omega,
            torque_nm: motor.torque(omega),
            power_w: motor.power(omega),
        })
        .collect()
}

/// Speed reducer output characteristic over the motor's operating range.
///
/// The reducer divides shaft speed by Ng and multiplies torque by Ng, so
/// output power equals motor shaft power sample for sample.
pub fn reducer_output_curve(assembly: &WheelAssembly, samples: usize) -> Vec<CurveSample> {
    let ng = assembly.speed_reducer().gear_ratio();
    motor_curve(assembly.motor(), samples)
        .into_iter()
        .map(|s| CurveSample {
            omega_rad_s: s.omega_rad_s / ng,
            torque_nm: s.torque_nm * ng,
            power_w: s.power_w,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ReducerKind, SpeedReducerSpec, WheelSpec};

    fn reference_assembly() -> WheelAssembly {
        WheelAssembly::new(
            WheelSpec::new(0.3, 1.0).unwrap(),
            SpeedReducerSpec::new(ReducerKind::Reverted, 0.04, 0.07, 1.5).unwrap(),
            MotorSpec::new(170.0, 0.0, 3.8, 5.0).unwrap(),
        )
    }

    #[test]
    fn motor_curve_spans_operating_range() {
        let assembly = reference_assembly();
        let curve = motor_curve(assembly.motor(), 11);
        assert_eq!(curve.len(), 11);
        assert_eq!(curve[0].omega_rad_s, 0.0);
        assert!((curve[10].omega_rad_s - 3.8).abs() < 1e-12);
        assert_eq!(curve[0].torque_nm, 170.0);
        assert!(curve[10].torque_nm.abs() < 1e-9);
        // power is zero at both endpoints of a zero no-load-torque motor
        assert_eq!(curve[0].power_w, 0.0);
        assert!(curve[10].power_w.abs() < 1e-9);
    }

    #[test]
    fn reducer_output_preserves_power() {
        let assembly = reference_assembly();
        let motor = motor_curve(assembly.motor(), 50);
        let output = reducer_output_curve(&assembly, 50);
        let ng = assembly.speed_reducer().gear_ratio();
        for (m, o) in motor.iter().zip(&output) {
            assert!((o.omega_rad_s - m.omega_rad_s / ng).abs() < 1e-12);
            assert!((o.torque_nm - m.torque_nm * ng).abs() < 1e-9);
            assert!((o.power_w - m.power_w).abs() < 1e-9);
        }
    }
}
