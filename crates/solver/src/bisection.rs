//! Bisection over a fallible, expensive objective.

use aero_config::SolverSettings;
use aero_core::vector::sign;
use thiserror::Error;
use tracing::{debug, warn};

/// Stopping rules for [`bisect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionOptions {
    /// Stop once half the bracket width is below this.
    pub tolerance: f64,
    /// Iteration budget, counting the initial evaluation of the lower bound.
    pub max_iterations: usize,
}

impl Default for BisectionOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-2,
            max_iterations: 1_000,
        }
    }
}

impl From<&SolverSettings> for BisectionOptions {
    fn from(settings: &SolverSettings) -> Self {
        Self {
            tolerance: settings.tolerance_m,
            max_iterations: settings.max_iterations,
        }
    }
}

#[derive(Debug, Error)]
pub enum BisectionError<E> {
    #[error("bisection did not converge after {iterations} iterations (bracket [{lower}, {upper}])")]
    NotConverged {
        iterations: usize,
        lower: f64,
        upper: f64,
    },
    #[error("objective evaluation failed: {0}")]
    Function(E),
}

/// Find a sign change of `f` in `[lower, upper]`.
///
/// `f(lower)` is evaluated once up front and every midpoint exactly once. The sub-interval
/// whose lower end has the same sign as the current lower end is discarded. Returns the
/// midpoint at which `f` is exactly zero or the bracket half-width drops below the tolerance.
pub fn bisect<F, E>(
    mut f: F,
    lower: f64,
    upper: f64,
    options: &BisectionOptions,
) -> Result<f64, BisectionError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a).map_err(BisectionError::Function)?;

    let mut iteration = 1;
    while iteration < options.max_iterations {
        let c = (a + b) / 2.0;
        let fc = f(c).map_err(BisectionError::Function)?;
        debug!(iteration, c, fc, "bisection step");
        if fc == 0.0 || (b - a) / 2.0 < options.tolerance {
            return Ok(c);
        }
        iteration += 1;
        if sign(fc) == sign(fa) {
            a = c;
            fa = fc;
        } else {
            b = c;
        }
    }

    warn!(
        iterations = options.max_iterations,
        lower = a,
        upper = b,
        "bisection failed to converge"
    );
    Err(BisectionError::NotConverged {
        iterations: options.max_iterations,
        lower: a,
        upper: b,
    })
}
