//! Conditions report from a weather payload on disk.
//! Prints historical and current assessments and, when candidates are given,
//! the ranked products for the reported snow type.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use glide_core::recommend::{recommend_or_nearest, Lookup};
use glide_core::{Candidate, ConditionsReport, Thresholds, WeatherPayload};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "glide-report", about = "Classify snow surface conditions and rank glide products")]
struct Args {
    /// Weather payload JSON: `{ "daily": [...], "hourly": [...] }`.
    #[arg(short, long)]
    weather: String,

    /// Candidate products JSON array.
    #[arg(short, long)]
    candidates: Option<String>,

    /// Partial thresholds override JSON.
    #[arg(short, long)]
    thresholds: Option<String>,

    /// Air temperature (°C) to rank for. Defaults to the first forecast hour.
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<f64>,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<String>,
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    report: ConditionsReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<Lookup<'a>>,
}

fn read_json(path: &str) -> Result<String> {
    fs::read_to_string(Path::new(path)).with_context(|| format!("reading {path}"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let payload = WeatherPayload::from_json(&read_json(&args.weather)?)
        .with_context(|| format!("parsing weather payload {}", args.weather))?;
    let thresholds = match &args.thresholds {
        Some(path) => Thresholds::from_json(&read_json(path)?)
            .with_context(|| format!("parsing thresholds {path}"))?,
        None => Thresholds::default(),
    };
    let candidates: Vec<Candidate> = match &args.candidates {
        Some(path) => serde_json::from_str(&read_json(path)?)
            .with_context(|| format!("parsing candidates {path}"))?,
        None => Vec::new(),
    };

    let report = ConditionsReport::build(&payload, &thresholds);
    let temperature = args
        .temperature
        .or_else(|| payload.hourly.first().map(|h| h.temp_c));

    let recommendations = match (args.candidates.is_some(), report.snow_type, temperature) {
        (true, Some(snow_type), Some(t)) => Some(recommend_or_nearest(&candidates, t, snow_type)),
        (true, None, _) => {
            tracing::warn!("no weather days or hours, nothing to recommend for");
            None
        }
        (true, _, None) => {
            tracing::warn!("no forecast temperature, pass --temperature to rank candidates");
            None
        }
        (false, ..) => None,
    };

    let out = Output { report, temperature, recommendations };
    let json = serde_json::to_string_pretty(&out)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {path}"))?;
            eprintln!("Wrote {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}
