//! Orbit elements in the orbital plane, derived from a single state vector.
use aero_core::vector::{self, Vector2};
use thiserror::Error;

/// Rounding slack accepted on dimensionless square-root arguments.
const RADICAND_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("geometrically impossible orbit: {0}")]
    Domain(String),
}

/// Classical elements of a planar conic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Specific orbital energy (m²/s²).
    pub ep: f64,
    /// Signed specific angular momentum (m²/s); positive for counter-clockwise motion.
    pub hmag: f64,
    /// Eccentricity.
    pub ec: f64,
    /// Semi-major axis (m); negative for hyperbolic orbits, infinite for parabolic ones.
    pub a: f64,
    /// Periapsis distance (m).
    pub rpe: f64,
    /// Apoapsis distance (m); negative for hyperbolic orbits.
    pub rap: f64,
}

impl OrbitParams {
    /// Compute the conic passing through `r` with velocity `v` around a body of parameter `mu`.
    pub fn from_state(r: &Vector2, v: &Vector2, mu: f64) -> Result<Self, OrbitError> {
        let ep = vector::dot(v, v) / 2.0 - mu / vector::norm(r);
        let hmag = vector::cross(r, v);

        let radicand = 1.0 + 2.0 * ep * hmag * hmag / mu / mu;
        let ec = if radicand >= 0.0 {
            radicand.sqrt()
        } else if radicand >= -RADICAND_SLACK {
            0.0
        } else {
            return Err(OrbitError::Domain(format!(
                "eccentricity radicand {radicand:e} is negative (energy {ep:e}, momentum {hmag:e})"
            )));
        };
        if !ec.is_finite() {
            return Err(OrbitError::Domain(format!(
                "non-finite eccentricity for r = {r:?}, v = {v:?}"
            )));
        }

        let a = -mu / (2.0 * ep);
        let (rpe, rap) = if a.is_finite() {
            (-a * (ec - 1.0), (1.0 + ec) * a)
        } else {
            (hmag * hmag / (mu * (1.0 + ec)), f64::INFINITY)
        };

        Ok(OrbitParams {
            ep,
            hmag,
            ec,
            a,
            rpe,
            rap,
        })
    }

    /// True for closed (elliptical) orbits.
    pub fn is_bound(&self) -> bool {
        self.ep < 0.0 && self.a.is_finite()
    }

    /// Burn at apoapsis that circularizes the orbit there (m/s).
    pub fn circularization_delta_v(&self, mu: f64) -> f64 {
        (mu / self.rap).sqrt() - (self.hmag / self.rap).abs()
    }
}

/// Split a speed `v` at distance `r` into `[radial, tangential]` components for an orbit with
/// periapsis `rpe`, using vis-viva and conservation of angular momentum.
pub fn approach_velocity(r: f64, v: f64, rpe: f64, mu: f64) -> Result<Vector2, OrbitError> {
    let periapsis_speed_sq = v * v + 2.0 * mu * (1.0 / rpe - 1.0 / r);
    let vy = (rpe / r) * clamped_sqrt(periapsis_speed_sq, v * v, "periapsis speed")?;
    let vx = clamped_sqrt(v * v - vy * vy, v * v, "radial speed")?;
    Ok([vx, vy])
}

fn clamped_sqrt(value: f64, scale: f64, what: &str) -> Result<f64, OrbitError> {
    if value >= 0.0 {
        Ok(value.sqrt())
    } else if value >= -RADICAND_SLACK * scale {
        Ok(0.0)
    } else {
        Err(OrbitError::Domain(format!(
            "{what} squared is negative ({value:e})"
        )))
    }
}
