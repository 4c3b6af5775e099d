use std::path::PathBuf;

use aero_cli::{Direction, init_tracing, parse_distance, resolve_planet, resolve_settings};
use aerobrake_calculator::export::{self, sweep as export_sweep};
use aerobrake_calculator::solver::{SweepRequest, sweep};
use anyhow::anyhow;
use clap::Parser;

/// Tabulate the apoapsis left after one pass for a range of periapsis altitudes.
#[derive(Parser, Debug)]
#[command(author, version, about = "Aerobraking periapsis sweep (CSV)")]
struct Cli {
    /// Body to aerobrake at (case-insensitive)
    #[arg(long, default_value = "Kerbin")]
    body: String,

    /// Current altitude above the surface (m; accepts km/Mm suffixes)
    #[arg(long, value_parser = parse_distance)]
    altitude: f64,

    /// Current orbital speed (m/s)
    #[arg(long)]
    velocity: f64,

    /// Lowest periapsis altitude (defaults to the surface)
    #[arg(long, value_parser = parse_distance)]
    from: Option<f64>,

    /// Highest periapsis altitude (defaults to the top of the atmosphere)
    #[arg(long, value_parser = parse_distance)]
    to: Option<f64>,

    /// Number of periapsis altitudes, both ends included
    #[arg(long, default_value_t = 50)]
    samples: usize,

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

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/sweep.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let planet = resolve_planet(cli.planets.as_deref(), &cli.body)?;
    let settings = resolve_settings(cli.settings.as_deref())?;

    let lower = cli.from.unwrap_or(0.0);
    let upper = cli.to.unwrap_or_else(|| planet.atmosphere_height_m());
    if upper < lower {
        return Err(anyhow!("sweep upper altitude must not be below the lower one"));
    }
    if cli.samples == 0 {
        return Err(anyhow!("sweep needs at least one sample"));
    }

    let request = SweepRequest {
        radius_m: planet.radius_at_altitude(cli.altitude),
        speed_m_s: cli.velocity,
        drag_coefficient: cli.drag,
        planet,
        direction: cli.direction.into(),
        settings,
        lower_altitude_m: lower,
        upper_altitude_m: upper,
        samples: cli.samples,
    };
    let points = sweep(&request)?;

    let mut writer = export::writer_for_path(&cli.output)?;
    export_sweep::write_sweep(&mut writer, &request, &points)?;
    drop(writer);

    if cli.output != PathBuf::from("-") {
        eprintln!(
            "Wrote {} rows for {} to {}",
            points.len(),
            request.planet.name,
            cli.output.display()
        );
    }
    Ok(())
}
