use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rover_speed_calculator::config::{build_rover, load_rovers};
use rover_speed_calculator::dynamics::curves::{motor_curve, reducer_output_curve};
use rover_speed_calculator::export::{curves, writer_for_path};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export motor and speed-reducer torque/speed/power curves as CSV"
)]
struct Cli {
    /// Rover catalog (YAML file or directory of TOML files)
    #[arg(long, default_value = "configs/rovers.yaml")]
    rovers: PathBuf,
    /// Rover name to look up in the catalog (defaults to the first entry)
    #[arg(long)]
    rover: Option<String>,
    /// Number of samples between zero and no-load speed
    #[arg(long, default_value_t = 500)]
    samples: usize,
    /// CSV output path (use `-` for stdout)
    #[arg(long, default_value = "artifacts/motor_curves.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let rovers = load_rovers(&cli.rovers)
        .with_context(|| format!("loading rover catalog {}", cli.rovers.display()))?;
    let rover_cfg = match &cli.rover {
        Some(name) => rovers
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .with_context(|| format!("rover '{name}' not found in catalog"))?,
        None => rovers.first().context("rover catalog is empty")?,
    };
    let rover = build_rover(rover_cfg)?;
    let assembly = rover.wheel_assembly();

    let mut writer = writer_for_path(&cli.output)?;
    curves::write_header(writer.as_mut())?;
    for sample in motor_curve(assembly.motor(), cli.samples) {
        curves::Record {
            stage: "motor",
            omega_rad_s: sample.omega_rad_s,
            torque_nm: sample.torque_nm,
            power_w: sample.power_w,
        }
        .write_to(writer.as_mut())?;
    }
    for sample in reducer_output_curve(assembly, cli.samples) {
        curves::Record {
            stage: "reducer_output",
            omega_rad_s: sample.omega_rad_s,
            torque_nm: sample.torque_nm,
            power_w: sample.power_w,
        }
        .write_to(writer.as_mut())?;
    }
    writer.flush()?;

    Ok(())
}
