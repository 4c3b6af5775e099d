//! Built-in bodies with atmospheres.

use aero_core::Planet;

use crate::ConfigError;

// name, radius, atmosphere height, SOI, mu, scale height, surface pressure, rotation period
const BODIES: [(&str, f64, f64, f64, f64, f64, f64, f64); 5] = [
    ("Eve", 700_000.0, 96_708.574, 85_109_365.0, 8.171_730_2e12, 7_000.0, 5.0, 80_500.0),
    ("Kerbin", 600_000.0, 69_077.553, 84_159_286.0, 3.5316e12, 5_000.0, 1.0, 21_600.0),
    ("Duna", 320_000.0, 41_446.532, 47_921_949.0, 301_363_210_000.0, 3_000.0, 0.2, 65_517.859),
    ("Jool", 6_000_000.0, 138_155.11, 2_455_985_200.0, 2.825_28e14, 10_000.0, 15.0, 36_000.0),
    ("Laythe", 500_000.0, 55_262.042, 3_723_645.8, 1.962e12, 4_000.0, 0.8, 52_980.879),
];

/// The stock bodies with atmospheres.
pub fn builtin_planets() -> Vec<Planet> {
    BODIES
        .iter()
        .map(|&(name, radius, atmosphere, soi, mu, scale_height, pressure, rotation)| Planet {
            name: name.to_string(),
            radius_m: radius,
            atmosphere_radius_m: atmosphere + radius,
            soi_radius_m: soi,
            mu_m3_s2: mu,
            scale_height_m: scale_height,
            surface_pressure_atm: pressure,
            rotation_period_s: rotation,
        })
        .collect()
}

/// Case-insensitive lookup by body name.
pub fn find_planet(planets: &[Planet], name: &str) -> Result<Planet, ConfigError> {
    let upper = name.to_uppercase();
    planets
        .iter()
        .find(|p| p.name.to_uppercase() == upper)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownBody(name.to_string()))
}
