use assert_cmd::Command;
use std::fs::{self, File};
use std::io::Write;

fn write_sweep_csv(path: &std::path::Path, rows: &[(f64, f64, &str)]) {
    let mut file = File::create(path).expect("csv create");
    writeln!(file, "terrain_angle_deg,crr,omega_rad_s,speed_m_s,outcome").unwrap();
    for (slope, crr, speed) in rows {
        if speed.is_empty() {
            writeln!(file, "{slope:.6},{crr:.6},,,no_root").unwrap();
        } else {
            writeln!(file, "{slope:.6},{crr:.6},1.000000,{speed},converged").unwrap();
        }
    }
}

#[test]
fn speed_plot_renders_line_png_with_no_root_gap() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("sweep.csv");
    let png_path = dir.path().join("sweep.png");

    write_sweep_csv(
        &csv_path,
        &[
            (-15.0, 0.15, ""),
            (-5.0, 0.15, "0.350000"),
            (0.0, 0.15, "0.330000"),
            (10.0, 0.15, "0.300000"),
            (20.0, 0.15, "0.250000"),
        ],
    );

    Command::cargo_bin("speed_plot")
        .expect("speed_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn speed_plot_renders_heatmap_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("grid.csv");
    let png_path = dir.path().join("grid.png");

    let mut rows = Vec::new();
    for slope in [0.0, 10.0, 20.0] {
        for (i, crr) in [0.05, 0.15, 0.3].iter().enumerate() {
            let speed = 0.35 - 0.05 * i as f64 - slope * 0.003;
            rows.push((slope, *crr, format!("{speed:.6}")));
        }
    }
    let borrowed: Vec<(f64, f64, &str)> = rows
        .iter()
        .map(|(s, c, v)| (*s, *c, v.as_str()))
        .collect();
    write_sweep_csv(&csv_path, &borrowed);

    Command::cargo_bin("speed_plot")
        .expect("speed_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    assert!(fs::metadata(png_path).expect("png metadata").len() > 0);
}

#[test]
fn speed_plot_rejects_csv_without_solvable_cells() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("empty.csv");
    let png_path = dir.path().join("empty.png");

    write_sweep_csv(&csv_path, &[(-15.0, 0.15, ""), (-12.0, 0.15, "")]);

    Command::cargo_bin("speed_plot")
        .expect("speed_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .failure();
}
