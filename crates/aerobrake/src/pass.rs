//! Forward model: the apoapsis left after one pass through the atmosphere.

use aero_config::SolverSettings;
use aero_core::vector;
use aero_core::Planet;
use aero_orbits::{approach_velocity, OrbitParams};
use tracing::debug;

use crate::atmosphere::{ForceModel, OrbitDirection};
use crate::encounter::{classify, Encounter};
use crate::integrator::{integrate, Trajectory};
use crate::AerobrakeError;

/// Vehicle and integration parameters for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSettings {
    pub step_size_s: f64,
    pub mass_kg: f64,
    pub area_m2: f64,
    pub max_steps: usize,
}

impl Default for PassSettings {
    fn default() -> Self {
        PassSettings::from(&SolverSettings::default())
    }
}

impl From<&SolverSettings> for PassSettings {
    fn from(settings: &SolverSettings) -> Self {
        Self {
            step_size_s: settings.step_size_s,
            mass_kg: settings.mass_kg,
            area_m2: settings.area_m2,
            max_steps: settings.max_integration_steps,
        }
    }
}

/// How a single approach ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassOutcome {
    /// Periapsis below the surface before reaching the atmosphere.
    Suborbital,
    /// Leaves the sphere of influence without touching the atmosphere.
    Escape,
    /// Never touches the atmosphere and stays bound.
    Stable(OrbitParams),
    /// Bound orbit inside the sphere of influence after the pass.
    Captured { exit: Trajectory, params: OrbitParams },
    /// Left the atmosphere on an orbit that leaves the sphere of influence.
    EscapedAfterPass { exit: Trajectory, params: OrbitParams },
    /// Hit the surface during the pass.
    Impact { exit: Trajectory },
}

impl PassOutcome {
    /// Apoapsis distance reported for this outcome: the surface radius for impacts and one
    /// metre beyond the sphere of influence for escapes.
    pub fn apoapsis(&self, planet: &Planet) -> f64 {
        match self {
            PassOutcome::Suborbital | PassOutcome::Impact { .. } => planet.radius_m,
            PassOutcome::Escape | PassOutcome::EscapedAfterPass { .. } => planet.escape_sentinel_m(),
            PassOutcome::Stable(params) | PassOutcome::Captured { params, .. } => params.rap,
        }
    }

    /// Orbit after the pass, when there is one.
    pub fn final_params(&self) -> Option<&OrbitParams> {
        match self {
            PassOutcome::Stable(params)
            | PassOutcome::Captured { params, .. }
            | PassOutcome::EscapedAfterPass { params, .. } => Some(params),
            PassOutcome::Suborbital | PassOutcome::Escape | PassOutcome::Impact { .. } => None,
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, PassOutcome::Captured { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassOutcome::Suborbital => "suborbital",
            PassOutcome::Escape => "escape",
            PassOutcome::Stable(_) => "stable",
            PassOutcome::Captured { .. } => "captured",
            PassOutcome::EscapedAfterPass { .. } => "escaped_after_pass",
            PassOutcome::Impact { .. } => "impact",
        }
    }
}

/// Fly a vehicle at distance `r` with speed `v` on an orbit of periapsis `rpe` through one
/// atmospheric pass with drag coefficient `drag`.
pub fn simulate_pass(
    r: f64,
    v: f64,
    rpe: f64,
    drag: f64,
    planet: &Planet,
    direction: OrbitDirection,
    settings: &PassSettings,
) -> Result<PassOutcome, AerobrakeError> {
    let r0 = [r, 0.0];
    let v0 = approach_velocity(r, v, rpe, planet.mu_m3_s2)?;

    let contact = match classify(&r0, &v0, planet)? {
        Encounter::Impact => return Ok(PassOutcome::Suborbital),
        Encounter::Escape => return Ok(PassOutcome::Escape),
        Encounter::Stable(params) => return Ok(PassOutcome::Stable(params)),
        Encounter::Atmospheric { contact, .. } => contact,
    };

    let model = ForceModel::new(drag, settings.mass_kg, settings.area_m2, planet, direction);
    let exit = integrate(
        &model,
        contact.position,
        contact.velocity,
        settings.step_size_s,
        planet,
        settings.max_steps,
    )?;

    let outcome = if vector::norm(&exit.position) < planet.radius_m {
        PassOutcome::Impact { exit }
    } else {
        let params = OrbitParams::from_state(&exit.position, &exit.velocity, planet.mu_m3_s2)?;
        if params.is_bound() && params.rap < planet.soi_radius_m {
            PassOutcome::Captured { exit, params }
        } else {
            PassOutcome::EscapedAfterPass { exit, params }
        }
    };
    debug!(
        rpe,
        outcome = outcome.label(),
        steps = exit.steps,
        elapsed_s = exit.elapsed_s,
        "atmospheric pass finished"
    );
    Ok(outcome)
}

/// Apoapsis distance after the pass, using the sentinels of [`PassOutcome::apoapsis`].
pub fn apoapsis_after_pass(
    r: f64,
    v: f64,
    rpe: f64,
    drag: f64,
    planet: &Planet,
    direction: OrbitDirection,
    settings: &PassSettings,
) -> Result<f64, AerobrakeError> {
    simulate_pass(r, v, rpe, drag, planet, direction, settings).map(|outcome| outcome.apoapsis(planet))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kerbin() -> Planet {
        Planet::new("Kerbin", 600_000.0, 69_077.553, 84_159_286.0, 3.5316e12, 5_000.0, 1.0, 21_600.0)
            .unwrap()
    }

    #[test]
    fn suborbital_returns_surface_radius() {
        let planet = kerbin();
        let ap = apoapsis_after_pass(700_000.0, 2_000.0, 400_000.0, 1.0, &planet, OrbitDirection::Prograde, &PassSettings::default())
            .unwrap();
        assert_eq!(ap, planet.radius_m);
    }

    #[test]
    fn hyperbolic_flyby_returns_escape_sentinel() {
        let planet = kerbin();
        let ap = apoapsis_after_pass(800_000.0, 4_000.0, 750_000.0, 1.0, &planet, OrbitDirection::Prograde, &PassSettings::default())
            .unwrap();
        assert_eq!(ap, planet.soi_radius_m + 1.0);
    }

    #[test]
    fn no_contact_keeps_initial_apoapsis() {
        let planet = kerbin();
        let r = 800_000.0;
        let v = 2_200.0;
        let rpe = 700_000.0;
        let velocity = approach_velocity(r, v, rpe, planet.mu_m3_s2).unwrap();
        let initial = OrbitParams::from_state(&[r, 0.0], &velocity, planet.mu_m3_s2).unwrap();

        let outcome = simulate_pass(r, v, rpe, 0.0, &planet, OrbitDirection::Ignore, &PassSettings::default()).unwrap();
        assert!(matches!(outcome, PassOutcome::Stable(_)));
        assert_eq!(outcome.apoapsis(&planet), initial.rap);
    }

    #[test]
    fn drag_free_dip_preserves_apoapsis() {
        let planet = kerbin();
        let r = 700_000.0;
        let v = 2_500.0;
        let rpe = 650_000.0;
        let velocity = approach_velocity(r, v, rpe, planet.mu_m3_s2).unwrap();
        let initial = OrbitParams::from_state(&[r, 0.0], &velocity, planet.mu_m3_s2).unwrap();

        let outcome = simulate_pass(r, v, rpe, 0.0, &planet, OrbitDirection::Prograde, &PassSettings::default()).unwrap();
        let PassOutcome::Captured { params, exit } = outcome else {
            panic!("expected capture, got {outcome:?}");
        };
        assert!((params.rap - initial.rap).abs() < 1_000.0, "rap = {}", params.rap);
        assert!(vector::norm(&exit.position) > planet.atmosphere_radius_m);
    }

    #[test]
    fn drag_lowers_apoapsis() {
        let planet = kerbin();
        let r = 700_000.0;
        let v = 2_500.0;
        let rpe = 650_000.0;
        let velocity = approach_velocity(r, v, rpe, planet.mu_m3_s2).unwrap();
        let initial = OrbitParams::from_state(&[r, 0.0], &velocity, planet.mu_m3_s2).unwrap();

        let outcome = simulate_pass(r, v, rpe, 1.0, &planet, OrbitDirection::Prograde, &PassSettings::default()).unwrap();
        assert!(outcome.is_captured(), "{outcome:?}");
        let ap = outcome.apoapsis(&planet);
        assert!(ap < initial.rap, "ap = {ap}, initial = {}", initial.rap);
        assert!(ap > planet.atmosphere_radius_m);
    }

    #[test]
    fn deep_dive_impacts() {
        let planet = kerbin();
        let outcome = simulate_pass(
            700_000.0,
            2_500.0,
            605_000.0,
            1.0,
            &planet,
            OrbitDirection::Prograde,
            &PassSettings::default(),
        )
        .unwrap();
        assert!(matches!(outcome, PassOutcome::Impact { .. }), "{outcome:?}");
        assert_eq!(outcome.apoapsis(&planet), planet.radius_m);
        assert!(outcome.final_params().is_none());
    }

    #[test]
    fn step_budget_surfaces_as_error() {
        let planet = kerbin();
        let settings = PassSettings {
            max_steps: 3,
            ..PassSettings::default()
        };
        let err = simulate_pass(700_000.0, 2_500.0, 640_000.0, 1.0, &planet, OrbitDirection::Prograde, &settings)
            .unwrap_err();
        assert_eq!(err, AerobrakeError::NonTermination { steps: 3 });
    }
}
