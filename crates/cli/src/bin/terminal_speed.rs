use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rover_speed_calculator::config::{build_planet, build_rover, load_planets, load_rovers};
use rover_speed_calculator::core::grid::linspace;
use rover_speed_calculator::dynamics::{RollingResistance, TerrainAngle};
use rover_speed_calculator::export::{surface, terminal, writer_for_path};
use rover_speed_calculator::solver::{BisectionSettings, TerminalSolution, solve_terminal_omega};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sweep terminal rover speed over terrain slope and rolling resistance",
    allow_negative_numbers = true
)]
struct Cli {
    /// Planet catalog (YAML file or directory of TOML files)
    #[arg(long, default_value = "configs/planets.yaml")]
    planets: PathBuf,
    /// Rover catalog (YAML file or directory of TOML files)
    #[arg(long, default_value = "configs/rovers.yaml")]
    rovers: PathBuf,
    /// Planet name to look up in the catalog
    #[arg(long, default_value = "MARS")]
    planet: String,
    /// Rover name to look up in the catalog (defaults to the first entry)
    #[arg(long)]
    rover: Option<String>,
    /// Terrain slope sweep range, degrees
    #[arg(long, default_value_t = -15.0)]
    slope_min: f64,
    #[arg(long, default_value_t = 35.0)]
    slope_max: f64,
    #[arg(long, default_value_t = 25)]
    slope_steps: usize,
    /// Rolling resistance sweep range
    #[arg(long, default_value_t = 0.01)]
    crr_min: f64,
    #[arg(long, default_value_t = 0.5)]
    crr_max: f64,
    #[arg(long, default_value_t = 25)]
    crr_steps: usize,
    /// Hold the slope fixed (degrees) and sweep rolling resistance only
    #[arg(long, conflicts_with = "fixed_crr")]
    fixed_slope: Option<f64>,
    /// Hold rolling resistance fixed and sweep the slope only
    #[arg(long)]
    fixed_crr: Option<f64>,
    /// Sweep the slope only, holding Crr at the rover's catalog default
    #[arg(long, conflicts_with_all = ["fixed_crr", "fixed_slope"])]
    catalog_crr: bool,
    /// Bisection tolerance on net force and bracket half-width
    #[arg(long, default_value_t = 1e-6)]
    tol: f64,
    /// Bisection iteration cap
    #[arg(long, default_value_t = 200)]
    max_iter: usize,
    /// CSV output path (use `-` for stdout)
    #[arg(long, default_value = "artifacts/terminal_speed.csv")]
    output: PathBuf,
    /// Optional JSON sidecar with the full speed surface
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let planets = load_planets(&cli.planets)
        .with_context(|| format!("loading planet catalog {}", cli.planets.display()))?;
    let rovers = load_rovers(&cli.rovers)
        .with_context(|| format!("loading rover catalog {}", cli.rovers.display()))?;

    let planet_cfg = planets
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(&cli.planet))
        .with_context(|| format!("planet '{}' not found in catalog", cli.planet))?;
    let rover_cfg = match &cli.rover {
        Some(name) => rovers
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .with_context(|| format!("rover '{name}' not found in catalog"))?,
        None => rovers.first().context("rover catalog is empty")?,
    };

    let planet = build_planet(planet_cfg)?;
    let rover = build_rover(rover_cfg)?;

    let slope_values = match cli.fixed_slope {
        Some(deg) => vec![deg],
        None => linspace(cli.slope_min, cli.slope_max, cli.slope_steps),
    };
    let crr_values = if cli.catalog_crr {
        let crr = rover_cfg
            .default_crr
            .with_context(|| format!("rover '{}' has no default_crr in the catalog", rover_cfg.name))?;
        vec![crr]
    } else {
        match cli.fixed_crr {
            Some(crr) => vec![crr],
            None => linspace(cli.crr_min, cli.crr_max, cli.crr_steps),
        }
    };

    let angles: Vec<TerrainAngle> = slope_values
        .iter()
        .map(|&deg| TerrainAngle::from_degrees(deg))
        .collect::<Result<_, _>>()
        .context("terrain slope range")?;
    let crrs: Vec<RollingResistance> = crr_values
        .iter()
        .map(|&c| RollingResistance::from_coefficient(c))
        .collect::<Result<_, _>>()
        .context("rolling resistance range")?;

    let settings = BisectionSettings {
        tol: cli.tol,
        max_iter: cli.max_iter,
    };

    // one bisection per cell feeds both the CSV rows and the JSON surface
    let mut writer = writer_for_path(&cli.output)?;
    terminal::write_header(writer.as_mut())?;
    let mut speeds_m_s: Vec<Vec<f64>> = Vec::with_capacity(angles.len());
    for &angle in &angles {
        let mut row = Vec::with_capacity(crrs.len());
        for &crr in &crrs {
            let solution = solve_terminal_omega(&rover, &planet, angle, crr, &settings);
            let omega = solution.omega_rad_s();
            let speed = omega.map(|w| rover.shaft_speed_to_rover_speed(w));
            let record = terminal::Record {
                terrain_angle_deg: angle.degrees(),
                crr: crr.value(),
                omega_rad_s: omega,
                speed_m_s: speed,
                outcome: outcome_label(solution),
            };
            record.write_to(writer.as_mut())?;
            row.push(speed.unwrap_or(f64::NAN));
        }
        speeds_m_s.push(row);
    }
    writer.flush()?;

    if let Some(json_path) = &cli.json {
        let terrain_angles_deg: Vec<f64> = angles.iter().map(|a| a.degrees()).collect();
        let crr_axis: Vec<f64> = crrs.iter().map(|c| c.value()).collect();
        surface::write_json(
            json_path,
            &surface::SurfaceSidecar {
                rover: &rover_cfg.name,
                planet: &planet_cfg.name,
                terrain_angles_deg: &terrain_angles_deg,
                crr_values: &crr_axis,
                speeds_m_s: &speeds_m_s,
            },
        )?;
    }

    Ok(())
}

fn outcome_label(solution: TerminalSolution) -> &'static str {
    match solution {
        TerminalSolution::Converged(_) => "converged",
        TerminalSolution::Exhausted(_) => "exhausted",
        TerminalSolution::NoRoot => "no_root",
    }
}
