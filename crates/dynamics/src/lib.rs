//! Validated rover, motor, and planet specifications plus the longitudinal
//! force model built on top of them.
//!
//! Construction is the only place invariants are checked: once a
//! [`RoverSpec`] or [`PlanetSpec`] exists, every force evaluation is
//! infallible scalar math. Per-call domain arguments (terrain angle,
//! rolling resistance) are newtypes with their own validating constructors.

pub mod curves;
pub mod forces;
pub mod spec;

pub use forces::DynamicsError;
pub use spec::{
    MotorSpec, PlanetSpec, ReducerKind, RollingResistance, RoverSpec, SpecError,
    SpeedReducerSpec, TerrainAngle, WheelAssembly, WheelSpec,
};
