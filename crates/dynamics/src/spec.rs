//! Immutable specification records for the rover, its drivetrain, and the planet.

use rover_core::constants::WHEEL_COUNT;
use thiserror::Error;

/// Steepest terrain the force model is defined for, in degrees.
pub const MAX_TERRAIN_ANGLE_DEG: f64 = 75.0;

/// Violations of the specification invariants. Each variant names the
/// parameter at fault so configuration mistakes surface with context.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecError {
    #[error("motor stall torque must be a non-negative, finite value, got {0} Nm")]
    InvalidStallTorque(f64),
    #[error("motor no-load torque must lie in [0, stall torque = {stall} Nm], got {no_load} Nm")]
    NoLoadTorqueOutOfRange { no_load: f64, stall: f64 },
    #[error("motor no-load speed must be positive, got {0} rad/s")]
    NonPositiveNoLoadSpeed(f64),
    #[error("unsupported speed reducer kind '{0}': only 'reverted' gear sets are supported")]
    UnsupportedReducer(String),
    #[error("speed reducer diameters must be positive, got pinion {pinion} m, gear {gear} m")]
    NonPositiveDiameter { pinion: f64, gear: f64 },
    #[error("wheel radius must be positive, got {0} m")]
    NonPositiveWheelRadius(f64),
    #[error("component mass must be non-negative and finite, got {0} kg")]
    InvalidMass(f64),
    #[error("planet surface gravity must be positive, got {0} m/s^2")]
    NonPositiveGravity(f64),
    #[error("terrain angle must lie within [-75, 75] degrees, got {0}")]
    TerrainAngleOutOfRange(f64),
    #[error("rolling resistance coefficient must be a positive scalar, got {0}")]
    NonPositiveCrr(f64),
}

fn check_mass(mass_kg: f64) -> Result<f64, SpecError> {
    if mass_kg.is_finite() && mass_kg >= 0.0 {
        Ok(mass_kg)
    } else {
        Err(SpecError::InvalidMass(mass_kg))
    }
}

/// DC motor torque-speed characteristic plus its mass contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorSpec {
    stall_torque_nm: f64,
    no_load_torque_nm: f64,
    no_load_speed_rad_s: f64,
    mass_kg: f64,
}

impl MotorSpec {
    pub fn new(
        stall_torque_nm: f64,
        no_load_torque_nm: f64,
        no_load_speed_rad_s: f64,
        mass_kg: f64,
    ) -> Result<Self, SpecError> {
        if !(stall_torque_nm.is_finite() && stall_torque_nm >= 0.0) {
            return Err(SpecError::InvalidStallTorque(stall_torque_nm));
        }
        if !(no_load_torque_nm.is_finite()
            && (0.0..=stall_torque_nm).contains(&no_load_torque_nm))
        {
            return Err(SpecError::NoLoadTorqueOutOfRange {
                no_load: no_load_torque_nm,
                stall: stall_torque_nm,
            });
        }
        if !(no_load_speed_rad_s.is_finite() && no_load_speed_rad_s > 0.0) {
            return Err(SpecError::NonPositiveNoLoadSpeed(no_load_speed_rad_s));
        }
        Ok(Self {
            stall_torque_nm,
            no_load_torque_nm,
            no_load_speed_rad_s,
            mass_kg: check_mass(mass_kg)?,
        })
    }

    pub fn stall_torque_nm(&self) -> f64 {
        self.stall_torque_nm
    }

    pub fn no_load_torque_nm(&self) -> f64 {
        self.no_load_torque_nm
    }

    pub fn no_load_speed_rad_s(&self) -> f64 {
        self.no_load_speed_rad_s
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    /// Shaft torque (Nm) at shaft speed `omega_rad_s`.
    ///
    /// Linear interpolation between the stall and no-load points. Speeds
    /// above no-load produce zero torque; negative speeds produce stall
    /// torque (reverse-direction stall), which keeps the curve defined for
    /// root-bracketing outside the nominal operating range.
    pub fn torque(&self, omega_rad_s: f64) -> f64 {
        if omega_rad_s < 0.0 {
            return self.stall_torque_nm;
        }
        if omega_rad_s > self.no_load_speed_rad_s {
            return 0.0;
        }
        let slope = (self.stall_torque_nm - self.no_load_torque_nm) / self.no_load_speed_rad_s;
        self.stall_torque_nm - slope * omega_rad_s
    }

    /// Shaft output power (W) at shaft speed `omega_rad_s`.
    pub fn power(&self, omega_rad_s: f64) -> f64 {
        self.torque(omega_rad_s) * omega_rad_s
    }
}

/// Gear topology of the speed reducer. Only reverted gear sets are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReducerKind {
    Reverted,
}

impl ReducerKind {
    /// Parse a configuration string, case-insensitively.
    pub fn parse(kind: &str) -> Result<Self, SpecError> {
        if kind.eq_ignore_ascii_case("reverted") {
            Ok(Self::Reverted)
        } else {
            Err(SpecError::UnsupportedReducer(kind.to_string()))
        }
    }
}

/// Reverted gear set between the motor shaft and the wheel axle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedReducerSpec {
    kind: ReducerKind,
    pinion_diameter_m: f64,
    gear_diameter_m: f64,
    mass_kg: f64,
}

impl SpeedReducerSpec {
    pub fn new(
        kind: ReducerKind,
        pinion_diameter_m: f64,
        gear_diameter_m: f64,
        mass_kg: f64,
    ) -> Result<Self, SpecError> {
        if !(pinion_diameter_m.is_finite()
            && pinion_diameter_m > 0.0
            && gear_diameter_m.is_finite()
            && gear_diameter_m > 0.0)
        {
            return Err(SpecError::NonPositiveDiameter {
                pinion: pinion_diameter_m,
                gear: gear_diameter_m,
            });
        }
        Ok(Self {
            kind,
            pinion_diameter_m,
            gear_diameter_m,
            mass_kg: check_mass(mass_kg)?,
        })
    }

    pub fn kind(&self) -> ReducerKind {
        self.kind
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    /// Speed reduction ratio Ng of the reverted gear set.
    pub fn gear_ratio(&self) -> f64 {
        let d = self.gear_diameter_m / self.pinion_diameter_m;
        d * d
    }
}

/// Wheel geometry and mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSpec {
    radius_m: f64,
    mass_kg: f64,
}

impl WheelSpec {
    pub fn new(radius_m: f64, mass_kg: f64) -> Result<Self, SpecError> {
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(SpecError::NonPositiveWheelRadius(radius_m));
        }
        Ok(Self {
            radius_m,
            mass_kg: check_mass(mass_kg)?,
        })
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }
}

/// One of the six identical wheel/reducer/motor assemblies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelAssembly {
    wheel: WheelSpec,
    speed_reducer: SpeedReducerSpec,
    motor: MotorSpec,
}

impl WheelAssembly {
    pub fn new(wheel: WheelSpec, speed_reducer: SpeedReducerSpec, motor: MotorSpec) -> Self {
        Self {
            wheel,
            speed_reducer,
            motor,
        }
    }

    pub fn wheel(&self) -> &WheelSpec {
        &self.wheel
    }

    pub fn speed_reducer(&self) -> &SpeedReducerSpec {
        &self.speed_reducer
    }

    pub fn motor(&self) -> &MotorSpec {
        &self.motor
    }

    pub fn mass_kg(&self) -> f64 {
        self.wheel.mass_kg + self.speed_reducer.mass_kg + self.motor.mass_kg
    }
}

/// Whole-rover mass and drivetrain description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoverSpec {
    wheel_assembly: WheelAssembly,
    chassis_mass_kg: f64,
    science_payload_mass_kg: f64,
    power_subsys_mass_kg: f64,
}

impl RoverSpec {
    pub fn new(
        wheel_assembly: WheelAssembly,
        chassis_mass_kg: f64,
        science_payload_mass_kg: f64,
        power_subsys_mass_kg: f64,
    ) -> Result<Self, SpecError> {
        Ok(Self {
            wheel_assembly,
            chassis_mass_kg: check_mass(chassis_mass_kg)?,
            science_payload_mass_kg: check_mass(science_payload_mass_kg)?,
            power_subsys_mass_kg: check_mass(power_subsys_mass_kg)?,
        })
    }

    pub fn wheel_assembly(&self) -> &WheelAssembly {
        &self.wheel_assembly
    }

    /// Total rover mass: six wheel assemblies plus chassis, science
    /// payload, and power subsystem.
    pub fn total_mass_kg(&self) -> f64 {
        WHEEL_COUNT as f64 * self.wheel_assembly.mass_kg()
            + self.chassis_mass_kg
            + self.science_payload_mass_kg
            + self.power_subsys_mass_kg
    }

    /// Rover translational speed (m/s) for a motor shaft speed (rad/s).
    ///
    /// The reducer divides shaft speed by Ng before it reaches the wheel.
    pub fn shaft_speed_to_rover_speed(&self, omega_rad_s: f64) -> f64 {
        let assembly = &self.wheel_assembly;
        omega_rad_s * assembly.wheel.radius_m / assembly.speed_reducer.gear_ratio()
    }
}

/// Planet surface environment; only gravity matters for the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    gravity_m_s2: f64,
}

impl PlanetSpec {
    pub fn new(gravity_m_s2: f64) -> Result<Self, SpecError> {
        if !(gravity_m_s2.is_finite() && gravity_m_s2 > 0.0) {
            return Err(SpecError::NonPositiveGravity(gravity_m_s2));
        }
        Ok(Self { gravity_m_s2 })
    }

    pub fn gravity_m_s2(&self) -> f64 {
        self.gravity_m_s2
    }
}

/// Terrain slope in degrees, restricted to the model's validity range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TerrainAngle(f64);

impl TerrainAngle {
    pub fn from_degrees(degrees: f64) -> Result<Self, SpecError> {
        if degrees.is_finite() && degrees.abs() <= MAX_TERRAIN_ANGLE_DEG {
            Ok(Self(degrees))
        } else {
            Err(SpecError::TerrainAngleOutOfRange(degrees))
        }
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        rover_core::units::deg_to_rad(self.0)
    }
}

/// Dimensionless rolling resistance coefficient, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RollingResistance(f64);

impl RollingResistance {
    pub fn from_coefficient(crr: f64) -> Result<Self, SpecError> {
        if crr.is_finite() && crr > 0.0 {
            Ok(Self(crr))
        } else {
            Err(SpecError::NonPositiveCrr(crr))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}
