use std::io;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use zodiac_ephemeris::chart::{ALL_BODIES, CelestialBody, Ephemeris};
use zodiac_ephemeris::export::csv::write_csv;
use zodiac_ephemeris::export::json::{EphemerisDocument, write_json};
use zodiac_ephemeris::export::text::render_table;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Print geocentric zodiac positions of the Sun, Moon, and planets"
)]
struct Cli {
    /// Moment to compute, ISO-8601 (defaults to now, UTC)
    #[arg(long)]
    date: Option<String>,

    /// Body id (0-9) or name; repeat to select several (defaults to all)
    #[arg(long = "body")]
    bodies: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let bodies = if cli.bodies.is_empty() {
        ALL_BODIES.to_vec()
    } else {
        cli.bodies
            .iter()
            .map(|raw| CelestialBody::parse(raw))
            .collect::<Result<Vec<_>, _>>()?
    };

    let result = Ephemeris::default().compute(cli.date.as_deref(), &bodies)?;

    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&result)),
        OutputFormat::Json => write_json(io::stdout().lock(), &EphemerisDocument::from(&result))?,
        OutputFormat::Csv => write_csv(io::stdout().lock(), &result)?,
    }
    Ok(())
}
