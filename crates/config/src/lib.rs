//! Configuration models and loaders for the Rover Speed Calculator.
//!
//! Raw serde records mirror the catalog files on disk; [`build_rover`] and
//! [`build_planet`] convert them into the validated domain types, which is
//! the single point where specification invariants are enforced.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use rover_dynamics::{
    MotorSpec, PlanetSpec, ReducerKind, RoverSpec, SpecError, SpeedReducerSpec, WheelAssembly,
    WheelSpec,
};

/// Planet catalog entry.
#[derive(Debug, Deserialize, Clone)]
pub struct PlanetConfig {
    pub name: String,
    pub gravity_m_s2: f64,
}

/// Wheel geometry in a rover catalog entry.
#[derive(Debug, Deserialize, Clone)]
pub struct WheelConfig {
    pub radius_m: f64,
    pub mass_kg: f64,
}

/// Speed reducer description; `kind` is parsed and validated on build.
#[derive(Debug, Deserialize, Clone)]
pub struct SpeedReducerConfig {
    pub kind: String,
    pub pinion_diameter_m: f64,
    pub gear_diameter_m: f64,
    pub mass_kg: f64,
}

/// DC motor torque-speed characteristic.
#[derive(Debug, Deserialize, Clone)]
pub struct MotorConfig {
    pub stall_torque_nm: f64,
    pub no_load_torque_nm: f64,
    pub no_load_speed_rad_s: f64,
    pub mass_kg: f64,
}

/// One of the six identical drive assemblies.
#[derive(Debug, Deserialize, Clone)]
pub struct WheelAssemblyConfig {
    pub wheel: WheelConfig,
    pub speed_reducer: SpeedReducerConfig,
    pub motor: MotorConfig,
}

/// Rover catalog entry.
#[derive(Debug, Deserialize, Clone)]
pub struct RoverConfig {
    pub name: String,
    pub wheel_assembly: WheelAssemblyConfig,
    pub chassis_mass_kg: f64,
    pub science_payload_mass_kg: f64,
    pub power_subsys_mass_kg: f64,
    /// Nominal rolling resistance for single-parameter studies.
    #[serde(default)]
    pub default_crr: Option<f64>,
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid specification for '{name}': {source}")]
    Invalid { name: String, source: SpecError },
}

/// Load planet configurations from a YAML file or a directory of TOML files.
pub fn load_planets<P: AsRef<Path>>(path: P) -> Result<Vec<PlanetConfig>, ConfigError> {
    load_records(path)
}

/// Load rover configurations from a YAML file or a directory of TOML files.
pub fn load_rovers<P: AsRef<Path>>(path: P) -> Result<Vec<RoverConfig>, ConfigError> {
    load_records(path)
}

/// Convert a raw rover record into the validated domain specification.
pub fn build_rover(config: &RoverConfig) -> Result<RoverSpec, ConfigError> {
    let invalid = |source| ConfigError::Invalid {
        name: config.name.clone(),
        source,
    };

    let assembly = &config.wheel_assembly;
    let wheel = WheelSpec::new(assembly.wheel.radius_m, assembly.wheel.mass_kg).map_err(invalid)?;
    let kind = ReducerKind::parse(&assembly.speed_reducer.kind).map_err(invalid)?;
    let reducer = SpeedReducerSpec::new(
        kind,
        assembly.speed_reducer.pinion_diameter_m,
        assembly.speed_reducer.gear_diameter_m,
        assembly.speed_reducer.mass_kg,
    )
    .map_err(invalid)?;
    let motor = MotorSpec::new(
        assembly.motor.stall_torque_nm,
        assembly.motor.no_load_torque_nm,
        assembly.motor.no_load_speed_rad_s,
        assembly.motor.mass_kg,
    )
    .map_err(invalid)?;

    RoverSpec::new(
        WheelAssembly::new(wheel, reducer, motor),
        config.chassis_mass_kg,
        config.science_payload_mass_kg,
        config.power_subsys_mass_kg,
    )
    .map_err(invalid)
}

/// Convert a raw planet record into the validated domain specification.
pub fn build_planet(config: &PlanetConfig) -> Result<PlanetSpec, ConfigError> {
    PlanetSpec::new(config.gravity_m_s2).map_err(|source| ConfigError::Invalid {
        name: config.name.clone(),
        source,
    })
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
