use aerobrake_calculator::units::m_to_km;
use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render resulting apoapsis against periapsis altitude from a sweep CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/sweep.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
    /// Draw a horizontal line at this apoapsis altitude (km)
    #[arg(long)]
    target_km: Option<f64>,
}

#[derive(Debug, Clone)]
struct Row {
    periapsis_km: f64,
    apoapsis_km: f64,
    outcome: String,
}

impl Row {
    fn is_orbit(&self) -> bool {
        matches!(self.outcome.as_str(), "captured" | "stable")
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let rows = read_rows(&cli.input)?;
    if rows.is_empty() {
        return Err(anyhow::anyhow!("No sweep rows in the provided CSV"));
    }

    let orbits: Vec<(f64, f64)> = rows
        .iter()
        .filter(|row| row.is_orbit())
        .map(|row| (row.periapsis_km, row.apoapsis_km))
        .collect();
    let impacts: Vec<f64> = rows
        .iter()
        .filter(|row| matches!(row.outcome.as_str(), "impact" | "suborbital"))
        .map(|row| row.periapsis_km)
        .collect();
    let escapes: Vec<f64> = rows
        .iter()
        .filter(|row| matches!(row.outcome.as_str(), "escape" | "escaped_after_pass"))
        .map(|row| row.periapsis_km)
        .collect();

    let (x_min, x_max) = bounds(rows.iter().map(|row| row.periapsis_km));
    let (mut y_min, mut y_max) = bounds(
        orbits
            .iter()
            .map(|&(_, ap)| ap)
            .chain(cli.target_km.into_iter()),
    );
    if !y_min.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    y_min = y_min.min(0.0);
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);
    let x_pad = ((x_max - x_min) * 0.02).max(0.1);

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!(
                "Apoapsis after one pass ({} escaping, {} impacting)",
                escapes.len(),
                impacts.len()
            ),
            caption_font,
        )
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )?;

    chart
        .configure_mesh()
        .x_desc("Periapsis altitude (km)")
        .y_desc("Apoapsis altitude (km)")
        .label_style(label_font)
        .x_labels(8)
        .y_labels(8)
        .draw()?;

    let line_color = RGBColor(20, 90, 180);
    chart.draw_series(LineSeries::new(orbits.iter().copied(), &line_color))?;
    chart.draw_series(
        orbits
            .iter()
            .map(|&(pe, ap)| Circle::new((pe, ap), 3, line_color.filled())),
    )?;

    let impact_color = RGBColor(200, 40, 40);
    chart.draw_series(
        impacts
            .iter()
            .map(|&pe| Cross::new((pe, y_min), 5, impact_color.stroke_width(2))),
    )?;

    if let Some(target) = cli.target_km {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x_min - x_pad, target), (x_max + x_pad, target)],
            ShapeStyle::from(&BLACK.mix(0.5)).stroke_width(1),
        )))?;
    }

    root.present()?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_rows(path: &str) -> anyhow::Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let periapsis_idx = column("periapsis_altitude_m")?;
    let apoapsis_idx = column("apoapsis_altitude_m")?;
    let outcome_idx = column("outcome")?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or_default().trim();
        let periapsis_m: f64 = field(periapsis_idx).parse()?;
        let apoapsis_m: f64 = field(apoapsis_idx).parse()?;
        rows.push(Row {
            periapsis_km: m_to_km(periapsis_m),
            apoapsis_km: m_to_km(apoapsis_m),
            outcome: field(outcome_idx).to_ascii_lowercase(),
        });
    }
    Ok(rows)
}
