//! Inverse aerobraking problem: find the periapsis that yields a target apoapsis after one
//! atmospheric pass, and sweep the forward model over a range of periapsides.

use aero_aerobrake::AerobrakeError;
use aero_orbits::OrbitError;
use thiserror::Error;

pub mod bisection;
pub mod solve;
pub mod sweep;

pub use bisection::{bisect, BisectionError, BisectionOptions};
pub use solve::{solve, SolveRequest, SolveResult};
pub use sweep::{sweep, SweepPoint, SweepRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("no solution for the requested apoapsis")]
    NoSolution,
    #[error("periapsis search did not converge after {iterations} iterations (bracket [{lower}, {upper}])")]
    NotConverged {
        iterations: usize,
        lower: f64,
        upper: f64,
    },
    #[error("pass simulation stayed inside the atmosphere for {steps} steps")]
    NonTermination { steps: usize },
    #[error("{0}")]
    Domain(String),
}

impl From<AerobrakeError> for SolveError {
    fn from(err: AerobrakeError) -> Self {
        match err {
            AerobrakeError::NonTermination { steps } => SolveError::NonTermination { steps },
            AerobrakeError::Orbit(OrbitError::Domain(message)) => SolveError::Domain(message),
            other => SolveError::Domain(other.to_string()),
        }
    }
}

impl From<BisectionError<AerobrakeError>> for SolveError {
    fn from(err: BisectionError<AerobrakeError>) -> Self {
        match err {
            BisectionError::NotConverged {
                iterations,
                lower,
                upper,
            } => SolveError::NotConverged {
                iterations,
                lower,
                upper,
            },
            BisectionError::Function(inner) => inner.into(),
        }
    }
}
