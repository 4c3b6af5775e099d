use aero_aerobrake::{simulate_pass, OrbitDirection, PassOutcome, PassSettings};
use aero_config::SolverSettings;
use aero_core::Planet;
use rayon::prelude::*;
use tracing::debug;

use crate::SolveError;

/// Forward-model evaluations over evenly spaced periapsis altitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRequest {
    pub radius_m: f64,
    pub speed_m_s: f64,
    pub drag_coefficient: f64,
    pub planet: Planet,
    pub direction: OrbitDirection,
    pub settings: SolverSettings,
    pub lower_altitude_m: f64,
    pub upper_altitude_m: f64,
    /// Number of altitudes, both ends included.
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub periapsis_altitude_m: f64,
    /// Apoapsis distance after the pass, with the impact and escape sentinels (m).
    pub apoapsis_m: f64,
    pub outcome: PassOutcome,
}

impl SweepRequest {
    pub fn altitudes(&self) -> Vec<f64> {
        match self.samples {
            0 => Vec::new(),
            1 => vec![self.lower_altitude_m],
            n => {
                let step = (self.upper_altitude_m - self.lower_altitude_m) / (n - 1) as f64;
                (0..n).map(|i| self.lower_altitude_m + step * i as f64).collect()
            }
        }
    }
}

/// Evaluate the forward model at every altitude of the request in parallel. Rows come back
/// in altitude order.
pub fn sweep(request: &SweepRequest) -> Result<Vec<SweepPoint>, SolveError> {
    let planet = &request.planet;
    let pass_settings = PassSettings::from(&request.settings);
    let altitudes = request.altitudes();
    debug!(body = %planet.name, samples = altitudes.len(), "sweeping periapsis altitudes");

    altitudes
        .into_par_iter()
        .map(|altitude| -> Result<SweepPoint, SolveError> {
            let outcome = simulate_pass(
                request.radius_m,
                request.speed_m_s,
                planet.radius_at_altitude(altitude),
                request.drag_coefficient,
                planet,
                request.direction,
                &pass_settings,
            )?;
            Ok(SweepPoint {
                periapsis_altitude_m: altitude,
                apoapsis_m: outcome.apoapsis(planet),
                outcome,
            })
        })
        .collect()
}
