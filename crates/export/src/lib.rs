//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod terminal {
    use std::io::{self, Write};

    const HEADER: &str = "terrain_angle_deg,crr,omega_rad_s,speed_m_s,outcome";

    /// Write the standard terminal-speed CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One sweep cell in the exported CSV.
    ///
    /// `omega_rad_s` and `speed_m_s` are left empty for cells with no
    /// equilibrium; `outcome` then reads `no_root`.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub terrain_angle_deg: f64,
        pub crr: f64,
        pub omega_rad_s: Option<f64>,
        pub speed_m_s: Option<f64>,
        pub outcome: &'a str,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.6},{:.6},{},{},{}",
                self.terrain_angle_deg,
                self.crr,
                fmt_opt(self.omega_rad_s),
                fmt_opt(self.speed_m_s),
                self.outcome,
            )
        }
    }

    fn fmt_opt(value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{v:.6}"),
            _ => String::new(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn record_rows_match_header_ordering() {
            let mut buf = Vec::new();
            write_header(&mut buf).unwrap();
            Record {
                terrain_angle_deg: 0.0,
                crr: 0.15,
                omega_rad_s: Some(3.0),
                speed_m_s: Some(0.29),
                outcome: "converged",
            }
            .write_to(&mut buf)
            .unwrap();
            Record {
                terrain_angle_deg: -15.0,
                crr: 0.1,
                omega_rad_s: None,
                speed_m_s: None,
                outcome: "no_root",
            }
            .write_to(&mut buf)
            .unwrap();

            let text = String::from_utf8(buf).unwrap();
            let mut lines = text.lines();
            assert_eq!(
                lines.next().unwrap(),
                "terrain_angle_deg,crr,omega_rad_s,speed_m_s,outcome"
            );
            assert_eq!(
                lines.next().unwrap(),
                "0.000000,0.150000,3.000000,0.290000,converged"
            );
            assert_eq!(lines.next().unwrap(), "-15.000000,0.100000,,,no_root");
        }
    }
}

pub mod surface {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// JSON sidecar for a 2-D sweep. Non-finite speeds serialize as `null`,
    /// which is the undefined-cell marker downstream consumers expect.
    #[derive(Debug, Serialize)]
    pub struct SurfaceSidecar<'a> {
        pub rover: &'a str,
        pub planet: &'a str,
        pub terrain_angles_deg: &'a [f64],
        pub crr_values: &'a [f64],
        pub speeds_m_s: &'a [Vec<f64>],
    }

    /// Write the sweep surface as pretty-printed JSON.
    pub fn write_json(path: &Path, sidecar: &SurfaceSidecar<'_>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, sidecar)?;
        Ok(())
    }
}

pub mod curves {
    use std::io::{self, Write};

    const HEADER: &str = "stage,omega_rad_s,torque_nm,power_w";

    /// Write the standard drivetrain-curve CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One sample of a motor or reducer-output characteristic.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub stage: &'a str,
        pub omega_rad_s: f64,
        pub torque_nm: f64,
        pub power_w: f64,
    }

    impl<'a> Record<'a> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.6},{:.6},{:.6}",
                self.stage, self.omega_rad_s, self.torque_nm, self.power_w,
            )
        }
    }
}
