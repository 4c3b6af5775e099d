//! Fixed-step velocity-Verlet integration through the atmosphere.

use aero_core::vector::{self, Vector2};
use aero_core::Planet;

use crate::atmosphere::ForceModel;
use crate::AerobrakeError;

/// State at the end of an atmospheric pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub position: Vector2,
    pub velocity: Vector2,
    pub elapsed_s: f64,
    pub steps: usize,
}

/// Advance `(r0, v0)` with step `dt` until the vehicle leaves the shell between the surface
/// and the top of the atmosphere, either by exiting upwards or by hitting the ground.
///
/// At least one step is always taken, even if the start point is already outside the shell.
/// Taking more than `max_steps` steps is reported as [`AerobrakeError::NonTermination`].
pub fn integrate(
    model: &ForceModel,
    r0: Vector2,
    v0: Vector2,
    dt: f64,
    planet: &Planet,
    max_steps: usize,
) -> Result<Trajectory, AerobrakeError> {
    let mut r = r0;
    let mut v = v0;
    let mut elapsed_s = 0.0;
    let mut steps = 0usize;

    loop {
        if steps == max_steps {
            return Err(AerobrakeError::NonTermination { steps });
        }
        (r, v) = verlet_step(model, &r, &v, dt);
        elapsed_s += dt;
        steps += 1;

        let radius = vector::norm(&r);
        if !(radius <= planet.atmosphere_radius_m && radius >= planet.radius_m) {
            break;
        }
    }

    Ok(Trajectory {
        position: r,
        velocity: v,
        elapsed_s,
        steps,
    })
}

/// One predictor-corrector step for an acceleration that depends on velocity.
fn verlet_step(model: &ForceModel, r: &Vector2, v: &Vector2, dt: f64) -> (Vector2, Vector2) {
    let a_t = model.acceleration(r, v);
    let r_new = vector::sum(&[*r, vector::scale(v, dt), vector::scale(&a_t, 0.5 * dt * dt)]);

    let v_euler = vector::add(v, &vector::scale(&a_t, dt));
    let v_est = vector::add(
        v,
        &vector::scale(&vector::add(&a_t, &model.acceleration(&r_new, &v_euler)), 0.5 * dt),
    );
    let v_new = vector::add(
        v,
        &vector::scale(&vector::add(&a_t, &model.acceleration(&r_new, &v_est)), 0.5 * dt),
    );
    (r_new, v_new)
}
