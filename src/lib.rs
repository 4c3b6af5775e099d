//! Aerobraking calculator.
//!
//! Predicts the apoapsis left after a single pass through a planet's atmosphere and solves
//! for the periapsis (and the burn that sets it) that reaches a target apoapsis. The
//! physics lives in the workspace crates; this crate re-exports them so the binaries and
//! integration tests share one entry point.

pub use aero_aerobrake as aerobrake;
pub use aero_config as config;
pub use aero_core::{constants, units, vector};
pub use aero_core::{Planet, PlanetError};
pub use aero_export as export;
pub use aero_orbits as orbits;
pub use aero_solver as solver;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
