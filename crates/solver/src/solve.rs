use aero_aerobrake::{apoapsis_after_pass, simulate_pass, OrbitDirection, PassOutcome, PassSettings};
use aero_config::SolverSettings;
use aero_core::vector::{self, Vector2};
use aero_core::Planet;
use aero_orbits::{approach_velocity, OrbitParams};
use tracing::{debug, info};

use crate::bisection::{bisect, BisectionOptions};
use crate::SolveError;

/// Current orbit of the vehicle and the apoapsis it should have after one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRequest {
    /// Distance from the planet's centre (m).
    pub radius_m: f64,
    /// Speed at `radius_m` (m/s).
    pub speed_m_s: f64,
    /// Periapsis distance of the current orbit (m).
    pub periapsis_m: f64,
    /// Apoapsis distance wanted after the pass (m).
    pub target_apoapsis_m: f64,
    pub drag_coefficient: f64,
    pub planet: Planet,
    pub direction: OrbitDirection,
    pub settings: SolverSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Periapsis distance that produces the target apoapsis (m).
    pub periapsis_m: f64,
    pub periapsis_altitude_m: f64,
    /// Burn at the current position that moves the periapsis there (m/s).
    pub delta_v_m_s: f64,
    /// Direction of the burn in the orbital frame, counter-clockwise from the radial (deg).
    pub delta_v_angle_deg: f64,
    /// Speed after the burn (m/s).
    pub speed_m_s: f64,
    pub initial_velocity: Vector2,
    pub corrected_velocity: Vector2,
    /// Apoapsis actually reached by the solved pass (m).
    pub apoapsis_m: f64,
    /// Burn at the new apoapsis that circularizes the orbit; only for captured passes.
    pub circularization_delta_v_m_s: Option<f64>,
    pub final_params: Option<OrbitParams>,
    pub outcome: PassOutcome,
}

/// Find the periapsis in `[Rmin, Ratm]` whose pass leaves the vehicle at the target apoapsis,
/// and the burn that gets it there from the current orbit.
pub fn solve(request: &SolveRequest) -> Result<SolveResult, SolveError> {
    let planet = &request.planet;
    let mu = planet.mu_m3_s2;
    let pass_settings = PassSettings::from(&request.settings);
    let options = BisectionOptions::from(&request.settings);

    let initial_velocity = approach_velocity(request.radius_m, request.speed_m_s, request.periapsis_m, mu)
        .map_err(|err| SolveError::Domain(err.to_string()))?;

    let objective = |pe: f64| {
        apoapsis_after_pass(
            request.radius_m,
            request.speed_m_s,
            pe,
            request.drag_coefficient,
            planet,
            request.direction,
            &pass_settings,
        )
        .map(|ap| ap - request.target_apoapsis_m)
    };
    let periapsis_m = bisect(objective, planet.radius_m, planet.atmosphere_radius_m, &options)?;
    debug!(periapsis_m, "periapsis search converged");

    let corrected_velocity = approach_velocity(request.radius_m, request.speed_m_s, periapsis_m, mu)
        .map_err(|_| SolveError::NoSolution)?;
    let burn = vector::sub(&corrected_velocity, &initial_velocity);
    let delta_v_m_s = vector::norm(&burn);
    let delta_v_angle_deg = burn[1].atan2(burn[0]).to_degrees();
    let speed_m_s = vector::norm(&corrected_velocity);
    if !(delta_v_m_s.is_finite() && delta_v_angle_deg.is_finite() && speed_m_s.is_finite()) {
        return Err(SolveError::NoSolution);
    }

    let outcome = simulate_pass(
        request.radius_m,
        request.speed_m_s,
        periapsis_m,
        request.drag_coefficient,
        planet,
        request.direction,
        &pass_settings,
    )?;
    let final_params = outcome.final_params().copied();
    let circularization_delta_v_m_s = match outcome {
        PassOutcome::Captured { params, .. } => Some(params.circularization_delta_v(mu)),
        _ => None,
    };

    info!(
        body = %planet.name,
        periapsis_m,
        delta_v_m_s,
        outcome = outcome.label(),
        "solved aerobraking periapsis"
    );
    Ok(SolveResult {
        periapsis_m,
        periapsis_altitude_m: periapsis_m - planet.radius_m,
        delta_v_m_s,
        delta_v_angle_deg,
        speed_m_s,
        initial_velocity,
        corrected_velocity,
        apoapsis_m: outcome.apoapsis(planet),
        circularization_delta_v_m_s,
        final_params,
        outcome,
    })
}
