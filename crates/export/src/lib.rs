//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod sweep {
    use std::io::{self, Write};

    use aero_solver::{SweepPoint, SweepRequest};

    pub const HEADER: &str =
        "periapsis_altitude_m,periapsis_m,apoapsis_m,apoapsis_altitude_m,outcome,body,direction,drag";

    /// Write the standard sweep CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the sweep exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub periapsis_altitude_m: f64,
        pub periapsis_m: f64,
        pub apoapsis_m: f64,
        pub apoapsis_altitude_m: f64,
        pub outcome: &'a str,
        pub body: &'a str,
        pub direction: &'a str,
        pub drag: f64,
    }

    impl<'a> Record<'a> {
        pub fn new(request: &'a SweepRequest, point: &'a SweepPoint) -> Self {
            let radius = request.planet.radius_m;
            Self {
                periapsis_altitude_m: point.periapsis_altitude_m,
                periapsis_m: point.periapsis_altitude_m + radius,
                apoapsis_m: point.apoapsis_m,
                apoapsis_altitude_m: point.apoapsis_m - radius,
                outcome: point.outcome.label(),
                body: &request.planet.name,
                direction: request.direction.as_str(),
                drag: request.drag_coefficient,
            }
        }

        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.3},{:.3},{:.3},{:.3},{},{},{},{}",
                self.periapsis_altitude_m,
                self.periapsis_m,
                self.apoapsis_m,
                self.apoapsis_altitude_m,
                self.outcome,
                self.body,
                self.direction,
                self.drag,
            )
        }
    }

    /// Write the header and one row per sweep point.
    pub fn write_sweep(
        writer: &mut dyn Write,
        request: &SweepRequest,
        points: &[SweepPoint],
    ) -> io::Result<()> {
        write_header(writer)?;
        for point in points {
            Record::new(request, point).write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod report {
    use std::io::{self, Write};
    use std::path::Path;

    use aero_orbits::OrbitParams;
    use aero_solver::{SolveRequest, SolveResult};
    use chrono::{SecondsFormat, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    #[derive(Debug, Serialize)]
    struct SolveReport<'a> {
        generated_at: String,
        body: &'a str,
        direction: &'a str,
        drag_coefficient: f64,
        radius_m: f64,
        speed_m_s: f64,
        periapsis_m: f64,
        target_apoapsis_m: f64,
        solution: Solution<'a>,
    }

    #[derive(Debug, Serialize)]
    struct Solution<'a> {
        periapsis_m: f64,
        periapsis_altitude_m: f64,
        delta_v_m_s: f64,
        delta_v_angle_deg: f64,
        speed_m_s: f64,
        apoapsis_m: f64,
        circularization_delta_v_m_s: Option<f64>,
        outcome: &'a str,
        final_orbit: Option<FinalOrbit>,
    }

    /// Non-finite values (parabolic apoapsis) serialize as `null`.
    #[derive(Debug, Serialize)]
    struct FinalOrbit {
        energy_m2_s2: f64,
        angular_momentum_m2_s: f64,
        eccentricity: f64,
        semi_major_axis_m: f64,
        periapsis_m: f64,
        apoapsis_m: f64,
    }

    impl From<&OrbitParams> for FinalOrbit {
        fn from(params: &OrbitParams) -> Self {
            Self {
                energy_m2_s2: params.ep,
                angular_momentum_m2_s: params.hmag,
                eccentricity: params.ec,
                semi_major_axis_m: params.a,
                periapsis_m: params.rpe,
                apoapsis_m: params.rap,
            }
        }
    }

    /// Write a JSON report of a solved request to `path` (`-` for stdout).
    pub fn write_report(path: &Path, request: &SolveRequest, result: &SolveResult) -> io::Result<()> {
        let report = SolveReport {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            body: &request.planet.name,
            direction: request.direction.as_str(),
            drag_coefficient: request.drag_coefficient,
            radius_m: request.radius_m,
            speed_m_s: request.speed_m_s,
            periapsis_m: request.periapsis_m,
            target_apoapsis_m: request.target_apoapsis_m,
            solution: Solution {
                periapsis_m: result.periapsis_m,
                periapsis_altitude_m: result.periapsis_altitude_m,
                delta_v_m_s: result.delta_v_m_s,
                delta_v_angle_deg: result.delta_v_angle_deg,
                speed_m_s: result.speed_m_s,
                apoapsis_m: result.apoapsis_m,
                circularization_delta_v_m_s: result.circularization_delta_v_m_s,
                outcome: result.outcome.label(),
                final_orbit: result.final_params.as_ref().map(FinalOrbit::from),
            },
        };

        let mut writer = super::writer_for_path(path)?;
        to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_aerobrake::{OrbitDirection, PassOutcome};
    use aero_config::{builtin_planets, find_planet, SolverSettings};
    use aero_orbits::OrbitParams;
    use aero_solver::{SolveRequest, SolveResult, SweepPoint, SweepRequest};

    fn sweep_request() -> SweepRequest {
        SweepRequest {
            radius_m: 700_000.0,
            speed_m_s: 2_500.0,
            drag_coefficient: 1.0,
            planet: find_planet(&builtin_planets(), "Kerbin").unwrap(),
            direction: OrbitDirection::Prograde,
            settings: SolverSettings::default(),
            lower_altitude_m: 0.0,
            upper_altitude_m: 60_000.0,
            samples: 2,
        }
    }

    #[test]
    fn sweep_csv_has_header_and_rows() {
        let request = sweep_request();
        let points = vec![
            SweepPoint {
                periapsis_altitude_m: 0.0,
                apoapsis_m: 600_000.0,
                outcome: PassOutcome::Suborbital,
            },
            SweepPoint {
                periapsis_altitude_m: 60_000.0,
                apoapsis_m: 84_159_287.0,
                outcome: PassOutcome::Escape,
            },
        ];
        let mut buffer = Vec::new();
        sweep::write_sweep(&mut buffer, &request, &points).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], sweep::HEADER);
        assert_eq!(
            lines[1],
            "0.000,600000.000,600000.000,0.000,suborbital,Kerbin,prograde,1"
        );
        assert!(lines[2].contains(",escape,Kerbin,prograde,"));
    }

    #[test]
    fn writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/sweep.csv");
        {
            let mut writer = writer_for_path(&path).unwrap();
            sweep::write_header(&mut writer).unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), sweep::HEADER);
    }

    #[test]
    fn report_is_valid_json_with_timestamp() {
        let planet = find_planet(&builtin_planets(), "Kerbin").unwrap();
        let params = OrbitParams {
            ep: -1.0e6,
            hmag: 1.0e9,
            ec: 0.5,
            a: 1.7658e6,
            rpe: 1.677_51e6,
            rap: 680_000.0 + 1.174_09e6,
        };
        let request = SolveRequest {
            radius_m: 700_000.0,
            speed_m_s: 2_500.0,
            periapsis_m: 640_000.0,
            target_apoapsis_m: 680_000.0,
            drag_coefficient: 1.0,
            planet,
            direction: OrbitDirection::Prograde,
            settings: SolverSettings::default(),
        };
        let result = SolveResult {
            periapsis_m: 630_000.0,
            periapsis_altitude_m: 30_000.0,
            delta_v_m_s: 12.5,
            delta_v_angle_deg: -90.0,
            speed_m_s: 2_500.0,
            initial_velocity: [100.0, 2_498.0],
            corrected_velocity: [100.0, 2_485.5],
            apoapsis_m: 680_000.0,
            circularization_delta_v_m_s: None,
            final_params: Some(params),
            outcome: PassOutcome::Stable(params),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report::write_report(&path, &request, &result).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["body"], "Kerbin");
        assert_eq!(value["direction"], "prograde");
        assert_eq!(value["solution"]["outcome"], "stable");
        assert_eq!(value["solution"]["periapsis_altitude_m"], 30_000.0);
        assert!(value["solution"]["circularization_delta_v_m_s"].is_null());
        assert_eq!(value["solution"]["final_orbit"]["eccentricity"], 0.5);
        let stamp = value["generated_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp}");
    }
}
