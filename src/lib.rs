//! Core physics and solver logic lives here.
//!
//! The force model, bisection solver, and parameter sweeps are split into
//! workspace crates; this facade re-exports them under one roof so the
//! CLI binaries and integration tests share a single dependency.

pub use rover_config as config;
pub use rover_core as core;
pub use rover_dynamics as dynamics;
pub use rover_export as export;
pub use rover_solver as solver;
pub use rover_sweep as sweep;

/// Returns the version of the library for smoke tests while scaffolding.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
