//! Oscilloscope - Headless Entry Point
//!
//! Builds the scope from a config file, applies any command line overrides
//! and prints either the sine panel's power spectrum as CSV or every
//! panel's initial trace as JSON.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use oscilloscope_rs::synthesis::Waveform;
use oscilloscope_rs::{config, PanelUpdate, ScopeApp, ScopeConfig, ScopeEvent};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `frequency,power` rows of the sine panel's spectrum
    Csv,
    /// Every panel's initial update
    Json,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "oscilloscope")]
#[command(about = "Sine synthesis and DFT power spectrum", long_about = None)]
struct Args {
    /// Config file (.toml or .json); defaults to scope.toml in the app data directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of samples in the sine panel
    #[arg(long, value_name = "N")]
    points: Option<usize>,

    /// Sampled duration of the sine panel
    #[arg(long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Sine frequency; the slider range is widened to include it
    #[arg(long, value_name = "HZ")]
    frequency: Option<f64>,

    /// Signal shown in the sine panel (sine, phase_shifted_sine, noisy_sine, square, sawtooth)
    #[arg(long, value_name = "NAME")]
    waveform: Option<Waveform>,

    /// Output encoding
    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

/// Panel update labelled with its panel's title
#[derive(Serialize)]
struct TitledUpdate<'a> {
    title: Option<&'static str>,
    update: &'a PanelUpdate,
}

fn load_config(args: &Args) -> anyhow::Result<ScopeConfig> {
    let mut config = match &args.config {
        Some(path) => ScopeConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => match config::default_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Using config from {:?}", path);
                ScopeConfig::load_or_default(path)
            }
            _ => ScopeConfig::default(),
        },
    };

    if let Some(points) = args.points {
        config.points = points;
    }
    if let Some(duration) = args.duration {
        config.t_max = duration;
    }
    if let Some(frequency) = args.frequency {
        config.panels.sine.frequency = config.panels.sine.frequency.with_initial(frequency);
    }
    if let Some(waveform) = args.waveform {
        config.panels.sine.waveform = waveform;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,oscilloscope_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    tracing::info!(
        "Starting oscilloscope with {} points over {} s ({} at {} Hz)",
        config.points,
        config.t_max,
        config.panels.sine.waveform,
        config.panels.sine.frequency.initial
    );

    let mut app = ScopeApp::new(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.format {
        OutputFormat::Csv => {
            if let PanelUpdate::Sine { spectrum, .. } = app.sine_update()? {
                writeln!(out, "frequency,power")?;
                for [f, p] in spectrum.plot_points() {
                    writeln!(out, "{},{}", f, p)?;
                }
            }
        }
        OutputFormat::Json => {
            let frame = app.initial_frame()?;
            let titled: Vec<TitledUpdate> = frame
                .iter()
                .map(|update| TitledUpdate {
                    title: update.panel().map(|panel| panel.display_name()),
                    update,
                })
                .collect();
            serde_json::to_writer_pretty(&mut out, &titled)?;
            writeln!(out)?;
        }
    }

    app.handle(ScopeEvent::Exit)?;
    tracing::info!("Shutting down...");
    Ok(())
}
