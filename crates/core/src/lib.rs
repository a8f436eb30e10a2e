//! Core units, constants, and shared primitives for the Rover Speed Calculator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const EARTH_GRAVITY: f64 = 9.80665;
    /// Surface gravity on Mars (m/s²).
    pub const MARS_GRAVITY: f64 = 3.72;
    /// Number of driven wheel assemblies on the rover.
    pub const WHEEL_COUNT: usize = 6;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Convert shaft speed in rad/s to revolutions per minute.
    #[inline]
    pub fn rad_s_to_rpm(v: f64) -> f64 {
        v * 60.0 / std::f64::consts::TAU
    }

    /// Convert revolutions per minute to rad/s.
    #[inline]
    pub fn rpm_to_rad_s(v: f64) -> f64 {
        v * std::f64::consts::TAU / 60.0
    }
}

/// Sampling helpers shared by the sweep and curve generators.
pub mod grid {
    /// Evenly spaced samples over `[lo, hi]` inclusive.
    ///
    /// Returns a single-element vector when `n <= 1`, mirroring the usual
    /// linspace degenerate case.
    pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
        if n <= 1 {
            return vec![lo];
        }
        let step = (hi - lo) / (n - 1) as f64;
        (0..n).map(|i| lo + step * i as f64).collect()
    }
}
