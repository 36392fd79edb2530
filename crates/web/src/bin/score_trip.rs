use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;
use telematics::{
    TripPoint,
    dto::quote::{QuoteReport, RawTripPoint},
    extract_features, load_model, quote_trip,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "score_trip")]
#[command(about = "Score a recorded trip offline", long_about = None)]
#[command(version)]
struct Cli {
    /// Trip JSON: `{"trip_data": [...]}` or a bare array of points
    file: PathBuf,

    #[arg(long, env = "MODEL_PATH", default_value = "risk_model.json")]
    model: PathBuf,

    /// Print the extracted features without loading a model
    #[arg(long)]
    features_only: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TripFile {
    Wrapped { trip_data: Vec<RawTripPoint> },
    Bare(Vec<RawTripPoint>),
}

impl TripFile {
    fn into_points(self) -> Vec<RawTripPoint> {
        match self {
            TripFile::Wrapped { trip_data } => trip_data,
            TripFile::Bare(points) => points,
        }
    }
}

/// Parses a trip file body into typed points.
fn parse_trip(json: &str) -> anyhow::Result<Vec<TripPoint>> {
    let trip: TripFile = serde_json::from_str(json).context("Failed to parse trip file")?;
    let raw_points = trip.into_points();
    if raw_points.is_empty() {
        bail!("Trip file contains no points");
    }

    TripPoint::from_raw_points(&raw_points).context("Invalid trip data")
}

/// Builds the JSON printed for a trip: the features alone, or a full quote.
fn render(points: &[TripPoint], features_only: bool, model_path: &Path) -> anyhow::Result<String> {
    if features_only {
        let features = extract_features(points).context("Could not process features")?;
        return Ok(serde_json::to_string_pretty(&features)?);
    }

    let model = load_model(model_path)
        .with_context(|| format!("Failed to load model {}", model_path.display()))?;
    let quote = quote_trip(points, model.as_ref()).context("Failed to quote trip")?;
    Ok(serde_json::to_string_pretty(&QuoteReport::from(&quote))?)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("score_trip={},telematics={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let json = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let points =
        parse_trip(&json).with_context(|| format!("In trip file {}", cli.file.display()))?;
    tracing::info!("Read {} points from {}", points.len(), cli.file.display());

    println!("{}", render(&points, cli.features_only, &cli.model)?);
    Ok(())
}
