//! Analytic classification of the arriving orbit, and the state at atmosphere contact.

use aero_core::vector::{self, Vector2};
use aero_core::Planet;
use aero_orbits::OrbitParams;
use tracing::debug;

use crate::AerobrakeError;

/// Overshoot of a sine/cosine outside [-1, 1] accepted as rounding.
const TRIG_SLACK: f64 = 1e-9;

/// Where the vehicle crosses the top of the atmosphere on the way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactState {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Angle from periapsis to the contact point (rad).
    pub true_anomaly: f64,
}

/// What the arriving orbit does before any drag acts on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encounter {
    /// Periapsis is below the surface.
    Impact,
    /// Leaves the sphere of influence without touching the atmosphere.
    Escape,
    /// Closed orbit that stays above the atmosphere and inside the sphere of influence.
    Stable(OrbitParams),
    /// The orbit dips into the atmosphere.
    Atmospheric {
        contact: ContactState,
        params: OrbitParams,
    },
}

/// Classify the orbit through `(r0, v0)` and, if it reaches the atmosphere, construct the
/// contact state that seeds the integrator.
pub fn classify(r0: &Vector2, v0: &Vector2, planet: &Planet) -> Result<Encounter, AerobrakeError> {
    let params = OrbitParams::from_state(r0, v0, planet.mu_m3_s2)?;

    let encounter = if params.rpe < planet.radius_m {
        Encounter::Impact
    } else if !params.is_bound() && params.rpe > planet.atmosphere_radius_m {
        Encounter::Escape
    } else if params.rpe > planet.atmosphere_radius_m {
        if params.rap < planet.soi_radius_m {
            Encounter::Stable(params)
        } else {
            Encounter::Escape
        }
    } else {
        Encounter::Atmospheric {
            contact: contact_state(&params, planet)?,
            params,
        }
    };
    debug!(?encounter, rpe = params.rpe, "classified arriving orbit");
    Ok(encounter)
}

/// Position and velocity at the top of the atmosphere. The velocity is built so the
/// vehicle is inbound at contact.
fn contact_state(params: &OrbitParams, planet: &Planet) -> Result<ContactState, AerobrakeError> {
    let r_atm = planet.atmosphere_radius_m;

    let cos_contact = (1.0 / params.ec) * (params.a * (1.0 - params.ec * params.ec) / r_atm - 1.0);
    let theta_contact = unit_interval(cos_contact, "cosine of contact anomaly")?.acos();

    let speed_sq = 2.0 * (params.ep + planet.mu_m3_s2 / r_atm);
    if !(speed_sq >= 0.0) {
        return Err(AerobrakeError::Domain(format!(
            "negative kinetic energy at contact ({speed_sq:e})"
        )));
    }
    let contact_speed = speed_sq.sqrt();

    let sin_path = params.hmag / (r_atm * contact_speed);
    let theta_1 = unit_interval(sin_path, "sine of velocity angle")?.asin();

    let position = vector::scale(&[theta_contact.cos(), theta_contact.sin()], r_atm);
    // [vr, vtheta] decomposition; the signs pick the inbound branch.
    let velocity = vector::scale(
        &[-(theta_1 + theta_contact).cos(), -(theta_1 + theta_contact).sin()],
        contact_speed,
    );

    Ok(ContactState {
        position,
        velocity,
        true_anomaly: theta_contact,
    })
}

fn unit_interval(value: f64, what: &str) -> Result<f64, AerobrakeError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else if value.abs() <= 1.0 + TRIG_SLACK {
        Ok(value.clamp(-1.0, 1.0))
    } else {
        Err(AerobrakeError::Domain(format!("{what} is {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_orbits::approach_velocity;

    fn kerbin() -> Planet {
        Planet::new("Kerbin", 600_000.0, 69_077.553, 84_159_286.0, 3.5316e12, 5_000.0, 1.0, 21_600.0)
            .unwrap()
    }

    fn seed(planet: &Planet, r: f64, v: f64, rpe: f64) -> (Vector2, Vector2) {
        let velocity = approach_velocity(r, v, rpe, planet.mu_m3_s2).unwrap();
        ([r, 0.0], velocity)
    }

    #[test]
    fn suborbital_is_impact() {
        let planet = kerbin();
        let (r, v) = seed(&planet, 700_000.0, 2_000.0, 400_000.0);
        assert_eq!(classify(&r, &v, &planet).unwrap(), Encounter::Impact);
    }

    #[test]
    fn fast_high_flyby_escapes() {
        let planet = kerbin();
        let (r, v) = seed(&planet, 800_000.0, 4_000.0, 750_000.0);
        assert_eq!(classify(&r, &v, &planet).unwrap(), Encounter::Escape);
    }

    #[test]
    fn high_elliptical_orbit_is_stable() {
        let planet = kerbin();
        let (r, v) = seed(&planet, 800_000.0, 2_200.0, 700_000.0);
        match classify(&r, &v, &planet).unwrap() {
            Encounter::Stable(params) => {
                assert!((params.rpe - 700_000.0).abs() < 1e-3);
                assert!(params.rap < planet.soi_radius_m);
            }
            other => panic!("expected stable orbit, got {other:?}"),
        }
    }

    #[test]
    fn bound_orbit_beyond_soi_escapes() {
        let planet = kerbin();
        let escape_speed = (2.0 * planet.mu_m3_s2 / 800_000.0).sqrt();
        let (r, v) = seed(&planet, 800_000.0, escape_speed - 1.0, 790_000.0);
        assert_eq!(classify(&r, &v, &planet).unwrap(), Encounter::Escape);
    }

    #[test]
    fn contact_state_sits_on_the_same_conic() {
        let planet = kerbin();
        let (r, v) = seed(&planet, 700_000.0, 2_500.0, 640_000.0);
        let Encounter::Atmospheric { contact, params } = classify(&r, &v, &planet).unwrap() else {
            panic!("expected atmospheric pass");
        };

        let radius = vector::norm(&contact.position);
        assert!((radius - planet.atmosphere_radius_m).abs() < 1e-6);
        let vis_viva = (2_500.0f64.powi(2)
            + 2.0 * planet.mu_m3_s2 * (1.0 / planet.atmosphere_radius_m - 1.0 / 700_000.0))
            .sqrt();
        assert!((vector::norm(&contact.velocity) - vis_viva).abs() < 1e-3);

        let at_contact = OrbitParams::from_state(&contact.position, &contact.velocity, planet.mu_m3_s2).unwrap();
        assert!((at_contact.ep - params.ep).abs() < 1e-3 * params.ep.abs());
        assert!((at_contact.rpe - params.rpe).abs() < 1.0);
        // Mirrored sense of rotation, same magnitude.
        assert!((at_contact.hmag + params.hmag).abs() < 1e-6 * params.hmag.abs());
        // Inbound.
        assert!(vector::dot(&contact.position, &contact.velocity) < 0.0);
    }
}
