//! Celestial body records consumed by the orbit and atmosphere models.

use thiserror::Error;

/// A body with an exponential atmosphere. All distances are measured from the body centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    /// Equatorial radius (m).
    pub radius_m: f64,
    /// Radius of the top of the atmosphere (m).
    pub atmosphere_radius_m: f64,
    /// Sphere of influence radius (m).
    pub soi_radius_m: f64,
    /// Gravitational parameter (m³/s²).
    pub mu_m3_s2: f64,
    /// Altitude over which pressure falls by 1/e (m).
    pub scale_height_m: f64,
    /// Pressure at zero altitude (atm).
    pub surface_pressure_atm: f64,
    /// Sidereal rotation period (s).
    pub rotation_period_s: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanetError {
    #[error("{name}: {field} must be positive and finite (got {value})")]
    NonPositive {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("{name}: expected radius < atmosphere radius < SOI ({radius} / {atmosphere} / {soi})")]
    Ordering {
        name: String,
        radius: f64,
        atmosphere: f64,
        soi: f64,
    },
}

impl Planet {
    /// Build a body from its surface radius and the height of its atmosphere above it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        radius_m: f64,
        atmosphere_height_m: f64,
        soi_radius_m: f64,
        mu_m3_s2: f64,
        scale_height_m: f64,
        surface_pressure_atm: f64,
        rotation_period_s: f64,
    ) -> Result<Self, PlanetError> {
        let planet = Planet {
            name: name.into(),
            radius_m,
            atmosphere_radius_m: atmosphere_height_m + radius_m,
            soi_radius_m,
            mu_m3_s2,
            scale_height_m,
            surface_pressure_atm,
            rotation_period_s,
        };
        planet.validate()?;
        Ok(planet)
    }

    /// Height of the atmosphere above the surface (m).
    pub fn atmosphere_height_m(&self) -> f64 {
        self.atmosphere_radius_m - self.radius_m
    }

    /// Distance from the centre for an altitude above the surface.
    #[inline]
    pub fn radius_at_altitude(&self, altitude_m: f64) -> f64 {
        altitude_m + self.radius_m
    }

    /// Apoapsis reported for trajectories that leave the sphere of influence.
    #[inline]
    pub fn escape_sentinel_m(&self) -> f64 {
        self.soi_radius_m + 1.0
    }

    /// Check the physical constants and the radius < atmosphere < SOI ordering.
    pub fn validate(&self) -> Result<(), PlanetError> {
        let fields = [
            ("radius", self.radius_m),
            ("atmosphere height", self.atmosphere_height_m()),
            ("sphere of influence", self.soi_radius_m),
            ("gravitational parameter", self.mu_m3_s2),
            ("scale height", self.scale_height_m),
            ("surface pressure", self.surface_pressure_atm),
            ("rotation period", self.rotation_period_s),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlanetError::NonPositive {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        if !(self.radius_m < self.atmosphere_radius_m && self.atmosphere_radius_m < self.soi_radius_m) {
            return Err(PlanetError::Ordering {
                name: self.name.clone(),
                radius: self.radius_m,
                atmosphere: self.atmosphere_radius_m,
                soi: self.soi_radius_m,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmosphere_height_is_stored_as_radius() {
        let planet = Planet::new("Test", 1_000.0, 100.0, 10_000.0, 1.0, 10.0, 1.0, 100.0).unwrap();
        assert_eq!(planet.atmosphere_radius_m, 1_100.0);
        assert!((planet.atmosphere_height_m() - 100.0).abs() < 1e-12);
        assert_eq!(planet.escape_sentinel_m(), 10_001.0);
    }

    #[test]
    fn rejects_non_positive_constants() {
        let err = Planet::new("Bad", 1_000.0, 100.0, 10_000.0, 0.0, 10.0, 1.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            PlanetError::NonPositive {
                field: "gravitational parameter",
                ..
            }
        ));
    }

    #[test]
    fn rejects_atmosphere_beyond_soi() {
        let err = Planet::new("Bad", 1_000.0, 20_000.0, 10_000.0, 1.0, 10.0, 1.0, 100.0).unwrap_err();
        assert!(matches!(err, PlanetError::Ordering { .. }));
    }
}
