use std::path::PathBuf;
use std::process::ExitCode;

use aero_cli::{Direction, init_tracing, parse_distance, resolve_planet, resolve_settings};
use aerobrake_calculator::export::report;
use aerobrake_calculator::solver::{SolveError, SolveRequest, solve};
use clap::Parser;
use tracing::warn;

/// Solve for the periapsis that aerobrakes a vehicle down to a target apoapsis in one pass.
#[derive(Parser, Debug)]
#[command(author, version, about = "Single-pass aerobraking calculator")]
struct Cli {
    /// Body to aerobrake at (case-insensitive)
    #[arg(long, default_value = "Kerbin")]
    body: String,

    /// Current altitude above the surface (m; accepts km/Mm suffixes)
    #[arg(long, value_parser = parse_distance, allow_hyphen_values = true)]
    altitude: f64,

    /// Current orbital speed (m/s)
    #[arg(long)]
    velocity: f64,

    /// Current periapsis altitude (m; accepts km/Mm suffixes)
    #[arg(long, value_parser = parse_distance, allow_hyphen_values = true)]
    periapsis: f64,

    /// Apoapsis altitude wanted after the pass (m; accepts km/Mm suffixes)
    #[arg(long, value_parser = parse_distance, allow_hyphen_values = true)]
    apoapsis: f64,

    /// Drag coefficient
    #[arg(long, default_value_t = 1.0)]
    drag: f64,

    /// Orbit direction relative to the planet's rotation
    #[arg(long, value_enum, default_value_t = Direction::Prograde)]
    direction: Direction,

    /// Solver settings file (YAML or TOML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Planet catalog file or directory (defaults to the built-in bodies)
    #[arg(long)]
    planets: Option<PathBuf>,

    /// Write a JSON report of the solution (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let planet = resolve_planet(cli.planets.as_deref(), &cli.body)?;
    let settings = resolve_settings(cli.settings.as_deref())?;

    let request = SolveRequest {
        radius_m: planet.radius_at_altitude(cli.altitude),
        speed_m_s: cli.velocity,
        periapsis_m: planet.radius_at_altitude(cli.periapsis),
        target_apoapsis_m: planet.radius_at_altitude(cli.apoapsis),
        drag_coefficient: cli.drag,
        planet,
        direction: cli.direction.into(),
        settings,
    };

    let result = match solve(&request) {
        Ok(result) => result,
        Err(err @ (SolveError::NoSolution | SolveError::Domain(_))) => {
            warn!(error = %err, "no aerobraking solution");
            println!("No Solution!");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    println!("Body:                    {}", request.planet.name);
    println!("Periapsis altitude:      {:.2} m", result.periapsis_altitude_m);
    println!("Delta-v:                 {:.2} m/s", result.delta_v_m_s);
    println!("Delta-v angle:           {:.2} deg", result.delta_v_angle_deg);
    println!("Resulting speed:         {:.2} m/s", result.speed_m_s);
    match result.circularization_delta_v_m_s {
        Some(dv) => println!("Circularization delta-v: {:.2} m/s", dv),
        None => println!("Circularization delta-v: n/a ({})", result.outcome.label()),
    }

    if let Some(path) = &cli.json {
        report::write_report(path, &request, &result)?;
    }
    Ok(ExitCode::SUCCESS)
}
