//! Plumbing shared by the `aerocalc` and `aerosweep` binaries.

use std::path::Path;

use aerobrake_calculator::aerobrake::OrbitDirection;
use aerobrake_calculator::config::{self, SolverSettings, builtin_planets, find_planet};
use aerobrake_calculator::units::parse_unit_float;
use aerobrake_calculator::Planet;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// How the atmosphere's rotation is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Prograde,
    Retrograde,
    Ignore,
}

impl From<Direction> for OrbitDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Prograde => OrbitDirection::Prograde,
            Direction::Retrograde => OrbitDirection::Retrograde,
            Direction::Ignore => OrbitDirection::Ignore,
        }
    }
}

/// Value parser for distances with an optional `km`/`Mm` suffix.
pub fn parse_distance(text: &str) -> Result<f64, String> {
    parse_unit_float(text).map_err(|err| err.to_string())
}

/// Look a body up in the catalog at `path`, or in the built-in table.
pub fn resolve_planet(path: Option<&Path>, name: &str) -> anyhow::Result<Planet> {
    let planets = match path {
        Some(path) => config::load_planets(path)?,
        None => builtin_planets(),
    };
    Ok(find_planet(&planets, name)?)
}

pub fn resolve_settings(path: Option<&Path>) -> anyhow::Result<SolverSettings> {
    match path {
        Some(path) => Ok(config::load_settings(path)?),
        None => Ok(SolverSettings::default()),
    }
}
