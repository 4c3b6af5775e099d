//! Gravity plus drag in a co-rotating exponential atmosphere.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use aero_core::constants::DRAG_CONSTANT;
use aero_core::vector::{self, Vector2};
use aero_core::Planet;

use crate::AerobrakeError;

/// Sense of the orbit relative to the planet's rotation. Selects how the wind seen by the
/// vehicle is derived from the co-rotating atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitDirection {
    #[default]
    Prograde,
    Retrograde,
    /// Treat the atmosphere as stationary.
    Ignore,
}

impl OrbitDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            OrbitDirection::Prograde => "prograde",
            OrbitDirection::Retrograde => "retrograde",
            OrbitDirection::Ignore => "ignore",
        }
    }
}

impl fmt::Display for OrbitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrbitDirection {
    type Err = AerobrakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prograde" => Ok(OrbitDirection::Prograde),
            "retrograde" => Ok(OrbitDirection::Retrograde),
            "ignore" => Ok(OrbitDirection::Ignore),
            _ => Err(AerobrakeError::UnknownDirection(s.to_string())),
        }
    }
}

/// Net force on the vehicle inside the atmosphere, for one drag coefficient and vehicle.
#[derive(Debug, Clone, Copy)]
pub struct ForceModel {
    drag_coefficient: f64,
    mass_kg: f64,
    area_m2: f64,
    direction: OrbitDirection,
    radius_m: f64,
    mu_m3_s2: f64,
    scale_height_m: f64,
    surface_pressure_atm: f64,
    angular_rate_rad_s: f64,
}

impl ForceModel {
    pub fn new(
        drag_coefficient: f64,
        mass_kg: f64,
        area_m2: f64,
        planet: &Planet,
        direction: OrbitDirection,
    ) -> Self {
        Self {
            drag_coefficient,
            mass_kg,
            area_m2,
            direction,
            radius_m: planet.radius_m,
            mu_m3_s2: planet.mu_m3_s2,
            scale_height_m: planet.scale_height_m,
            surface_pressure_atm: planet.surface_pressure_atm,
            angular_rate_rad_s: 2.0 * PI / planet.rotation_period_s,
        }
    }

    /// Exponential pressure profile. Only meaningful between the surface and the
    /// top of the atmosphere.
    #[inline]
    pub fn density(&self, r: &Vector2) -> f64 {
        self.surface_pressure_atm * ((self.radius_m - vector::norm(r)) / self.scale_height_m).exp()
    }

    /// Velocity relative to the air at `r`.
    #[inline]
    pub fn surface_velocity(&self, r: &Vector2, v: &Vector2) -> Vector2 {
        let wind = [-self.angular_rate_rad_s * r[1], self.angular_rate_rad_s * r[0]];
        match self.direction {
            OrbitDirection::Prograde => vector::sub(v, &vector::scale(&wind, -1.0)),
            OrbitDirection::Retrograde => vector::sub(v, &wind),
            OrbitDirection::Ignore => *v,
        }
    }

    /// Drag plus gravity (N).
    pub fn force(&self, r: &Vector2, v: &Vector2) -> Vector2 {
        let v_surface = self.surface_velocity(r, v);
        let drag = vector::scale(
            &v_surface,
            -0.5 * DRAG_CONSTANT
                * self.density(r)
                * vector::norm(&v_surface)
                * self.drag_coefficient
                * self.mass_kg
                * self.area_m2,
        );
        let gravity = vector::scale(r, -self.mass_kg * self.mu_m3_s2 / vector::norm(r).powi(3));
        vector::add(&drag, &gravity)
    }

    /// Acceleration (m/s²).
    #[inline]
    pub fn acceleration(&self, r: &Vector2, v: &Vector2) -> Vector2 {
        vector::scale(&self.force(r, v), 1.0 / self.mass_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kerbin() -> Planet {
        Planet::new("Kerbin", 600_000.0, 69_077.553, 84_159_286.0, 3.5316e12, 5_000.0, 1.0, 21_600.0)
            .unwrap()
    }

    #[test]
    fn parses_direction_names() {
        assert_eq!("Prograde".parse::<OrbitDirection>().unwrap(), OrbitDirection::Prograde);
        assert_eq!("RETROGRADE".parse::<OrbitDirection>().unwrap(), OrbitDirection::Retrograde);
        assert_eq!("ignore".parse::<OrbitDirection>().unwrap(), OrbitDirection::Ignore);
        assert!(matches!(
            "sideways".parse::<OrbitDirection>(),
            Err(AerobrakeError::UnknownDirection(_))
        ));
    }

    #[test]
    fn density_is_surface_pressure_at_radius() {
        let planet = kerbin();
        let model = ForceModel::new(1.0, 1.0, 1.0, &planet, OrbitDirection::Ignore);
        assert!((model.density(&[600_000.0, 0.0]) - 1.0).abs() < 1e-12);
        let one_scale_height = model.density(&[0.0, 605_000.0]);
        assert!((one_scale_height - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn no_drag_leaves_pure_gravity() {
        let planet = kerbin();
        let model = ForceModel::new(0.0, 2.0, 1.0, &planet, OrbitDirection::Prograde);
        let r = [650_000.0, 0.0];
        let force = model.force(&r, &[0.0, 2_300.0]);
        let expected = -2.0 * planet.mu_m3_s2 / (650_000.0f64 * 650_000.0);
        assert!((force[0] - expected).abs() < 1e-9);
        assert_eq!(force[1], 0.0);
        let accel = model.acceleration(&r, &[0.0, 2_300.0]);
        assert!((accel[0] - expected / 2.0).abs() < 1e-9);
    }

    #[test]
    fn drag_opposes_air_relative_motion() {
        let planet = kerbin();
        let r = [0.0, 650_000.0];
        let v = [-2_300.0, 0.0];
        let drag_only = |direction| {
            let with_drag = ForceModel::new(1.0, 1.0, 1.0, &planet, direction).force(&r, &v);
            let gravity = ForceModel::new(0.0, 1.0, 1.0, &planet, direction).force(&r, &v);
            vector::sub(&with_drag, &gravity)
        };

        let ignore = drag_only(OrbitDirection::Ignore);
        assert!(ignore[0] > 0.0);
        assert!(ignore[1].abs() < 1e-12);

        // Wind at [0, r] blows towards -x; how it combines with v depends on the direction.
        let prograde = drag_only(OrbitDirection::Prograde);
        let retrograde = drag_only(OrbitDirection::Retrograde);
        assert!(prograde[0] > ignore[0]);
        assert!(retrograde[0] < ignore[0]);
    }

    #[test]
    fn surface_velocity_adds_corotation() {
        let planet = kerbin();
        let model = ForceModel::new(1.0, 1.0, 1.0, &planet, OrbitDirection::Retrograde);
        let r = [600_000.0, 0.0];
        let rate = 2.0 * PI / 21_600.0;
        let vs = model.surface_velocity(&r, &[0.0, 0.0]);
        assert!(vs[0].abs() < 1e-12);
        assert!((vs[1] + rate * 600_000.0).abs() < 1e-9);
    }
}
