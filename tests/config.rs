use rover_speed_calculator::config::{
    ConfigError, build_planet, build_rover, load_planets, load_rovers,
};
use rover_speed_calculator::dynamics::SpecError;

#[test]
fn shipped_catalogs_load_and_validate() {
    let planets = load_planets("configs/planets.yaml").expect("planet catalog");
    let rovers = load_rovers("configs/rovers.yaml").expect("rover catalog");

    let mars = planets
        .iter()
        .find(|p| p.name == "MARS")
        .expect("MARS entry");
    let planet = build_planet(mars).expect("valid planet");
    assert!((planet.gravity_m_s2() - 3.72).abs() < 1e-12);

    let reference = rovers.first().expect("at least one rover");
    assert_eq!(reference.name, "reference");
    assert_eq!(reference.default_crr, Some(0.15));

    let rover = build_rover(reference).expect("valid rover");
    assert!((rover.total_mass_kg() - 869.0).abs() < 1e-9);
    assert!((rover.wheel_assembly().motor().no_load_speed_rad_s() - 3.8).abs() < 1e-12);
}

#[test]
fn toml_and_yaml_loaders_agree() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mars.toml"),
        "name = \"MARS\"\ngravity_m_s2 = 3.72\n",
    )
    .unwrap();
    let from_toml = load_planets(dir.path().join("mars.toml")).unwrap();
    let from_yaml = load_planets("configs/planets.yaml").unwrap();

    let yaml_mars = from_yaml.iter().find(|p| p.name == "MARS").unwrap();
    assert_eq!(from_toml[0].gravity_m_s2, yaml_mars.gravity_m_s2);
}

#[test]
fn invalid_catalog_entries_surface_the_violated_invariant() {
    let yaml = r#"
- name: broken
  wheel_assembly:
    wheel:
      radius_m: -0.3
      mass_kg: 1.0
    speed_reducer:
      kind: reverted
      pinion_diameter_m: 0.04
      gear_diameter_m: 0.07
      mass_kg: 1.5
    motor:
      stall_torque_nm: 170.0
      no_load_torque_nm: 0.0
      no_load_speed_rad_s: 3.8
      mass_kg: 5.0
  chassis_mass_kg: 659.0
  science_payload_mass_kg: 75.0
  power_subsys_mass_kg: 90.0
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rovers.yaml");
    std::fs::write(&path, yaml).unwrap();

    let configs = load_rovers(&path).unwrap();
    match build_rover(&configs[0]) {
        Err(ConfigError::Invalid { name, source }) => {
            assert_eq!(name, "broken");
            assert!(matches!(source, SpecError::NonPositiveWheelRadius(_)));
            // the rendered message names the offending value
            let message = format!("{source}");
            assert!(message.contains("wheel radius"), "message: {message}");
        }
        other => panic!("expected Invalid error, got {other:?}"),
    }
}

#[test]
fn missing_catalog_reports_io_error() {
    match load_planets("configs/does_not_exist.yaml") {
        Err(ConfigError::Io(_)) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}
