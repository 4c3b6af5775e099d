//! Configuration models and loaders for the aerobraking calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use aero_core::{Planet, PlanetError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub mod catalog;

pub use catalog::{builtin_planets, find_planet};

/// Planetary configuration parsed from catalog files.
///
/// Mirrors the built-in table: the atmosphere is given as a height above the surface.
#[derive(Debug, Deserialize, Clone)]
pub struct PlanetConfig {
    pub name: String,
    pub radius_m: f64,
    pub atmosphere_height_m: f64,
    pub soi_radius_m: f64,
    pub mu_m3_s2: f64,
    pub scale_height_m: f64,
    pub surface_pressure_atm: f64,
    pub rotation_period_s: f64,
}

impl TryFrom<PlanetConfig> for Planet {
    type Error = PlanetError;

    fn try_from(value: PlanetConfig) -> Result<Self, Self::Error> {
        Planet::new(
            value.name,
            value.radius_m,
            value.atmosphere_height_m,
            value.soi_radius_m,
            value.mu_m3_s2,
            value.scale_height_m,
            value.surface_pressure_atm,
            value.rotation_period_s,
        )
    }
}

/// Numerical settings shared by the forward model and the periapsis search.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SolverSettings {
    /// Fixed integration step (s).
    pub step_size_s: f64,
    /// Vehicle mass used by the force model (kg).
    pub mass_kg: f64,
    /// Reference area used by the force model (m²).
    pub area_m2: f64,
    /// Bisection stops once the bracket half-width drops below this (m).
    pub tolerance_m: f64,
    pub max_iterations: usize,
    /// Upper bound on integration steps for one atmospheric pass.
    pub max_integration_steps: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            step_size_s: 1.0,
            mass_kg: 1.0,
            area_m2: 1.0,
            tolerance_m: 1e-2,
            max_iterations: 1_000,
            max_integration_steps: 1_000_000,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid planet: {0}")]
    Planet(#[from] PlanetError),
    #[error("invalid solver settings: {0}")]
    Settings(String),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
}

/// Load planets from a YAML file, a TOML file, or a directory of TOML files.
pub fn load_planets<P: AsRef<Path>>(path: P) -> Result<Vec<Planet>, ConfigError> {
    let configs: Vec<PlanetConfig> = load_records(path)?;
    let planets = configs
        .into_iter()
        .map(Planet::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = planets.len(), "loaded planet catalog");
    Ok(planets)
}

/// Load solver settings from a single YAML or TOML file. Missing keys keep their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<SolverSettings, ConfigError> {
    let path = path.as_ref();
    let settings: SolverSettings = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &SolverSettings) -> Result<(), ConfigError> {
    let positive = [
        ("step_size_s", settings.step_size_s),
        ("mass_kg", settings.mass_kg),
        ("area_m2", settings.area_m2),
        ("tolerance_m", settings.tolerance_m),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::Settings(format!(
                "{field} must be positive (got {value})"
            )));
        }
    }
    if settings.max_iterations < 2 {
        return Err(ConfigError::Settings(
            "max_iterations must allow at least one bisection step".to_string(),
        ));
    }
    if settings.max_integration_steps == 0 {
        return Err(ConfigError::Settings(
            "max_integration_steps must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINMUS_TOML: &str = r#"
name = "Minmus"
radius_m = 60000.0
atmosphere_height_m = 1000.0
soi_radius_m = 2247428.4
mu_m3_s2 = 1.7658e9
scale_height_m = 500.0
surface_pressure_atm = 0.01
rotation_period_s = 40400.0
"#;

    #[test]
    fn loads_yaml_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bodies.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            "- name: Kerbin\n  radius_m: 600000\n  atmosphere_height_m: 69077.553\n  soi_radius_m: 84159286\n  mu_m3_s2: 3.5316e12\n  scale_height_m: 5000\n  surface_pressure_atm: 1\n  rotation_period_s: 21600"
        )
        .unwrap();

        let planets = load_planets(&path).expect("yaml catalog");
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].name, "Kerbin");
        assert_eq!(planets[0].atmosphere_radius_m, 69_077.553 + 600_000.0);
    }

    #[test]
    fn loads_directory_of_toml_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("minmus.toml"), MINMUS_TOML).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let planets = load_planets(dir.path()).expect("toml directory");
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].name, "Minmus");
    }

    #[test]
    fn rejects_inconsistent_planet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, MINMUS_TOML.replace("2247428.4", "1000.0")).unwrap();
        assert!(matches!(
            load_planets(&path),
            Err(ConfigError::Planet(PlanetError::Ordering { .. }))
        ));
    }

    #[test]
    fn settings_fill_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.toml");
        std::fs::write(&path, "step_size_s = 0.5\nmax_iterations = 60\n").unwrap();

        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.step_size_s, 0.5);
        assert_eq!(settings.max_iterations, 60);
        assert_eq!(settings.tolerance_m, SolverSettings::default().tolerance_m);
    }

    #[test]
    fn settings_reject_zero_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.yaml");
        std::fs::write(&path, "step_size_s: 0.0\n").unwrap();
        assert!(matches!(load_settings(&path), Err(ConfigError::Settings(_))));
    }
}
