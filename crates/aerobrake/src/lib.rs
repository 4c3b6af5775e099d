//! Single-pass aerobraking model: exponential atmosphere drag, a fixed-step integrator, and
//! the analytic set-up that skips the vacuum part of the approach.

use aero_orbits::OrbitError;
use thiserror::Error;

pub mod atmosphere;
pub mod encounter;
pub mod integrator;
pub mod pass;

pub use atmosphere::{ForceModel, OrbitDirection};
pub use encounter::{classify, ContactState, Encounter};
pub use integrator::{integrate, Trajectory};
pub use pass::{apoapsis_after_pass, simulate_pass, PassOutcome, PassSettings};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AerobrakeError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error("atmosphere contact is undefined: {0}")]
    Domain(String),
    #[error("trajectory stayed inside the atmosphere for {steps} steps")]
    NonTermination { steps: usize },
    #[error("unknown orbit direction '{0}' (expected prograde, retrograde or ignore)")]
    UnknownDirection(String),
}
