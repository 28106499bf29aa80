use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sealtrace", about = "Detect an audio watermark and look up its message ID")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV log of `id,metadata` rows (overrides the config)
    #[arg(short, long)]
    metadata_log: Option<PathBuf>,

    /// WAV file to scan (overrides the config)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => sealtrace_core::AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => sealtrace_core::AppConfig::default(),
    };
    if let Some(input) = cli.input {
        config.audio.input_path = input;
    }
    if let Some(log) = cli.metadata_log {
        config.metadata.log_path = log;
    }

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let registry = sealtrace_detector::DetectorRegistry::new();
    let mut pipeline = sealtrace_pipeline::Pipeline::from_config(&config, &registry)
        .context("error loading model")?;

    let input = config.audio.input_path.clone();
    let audio = pipeline
        .load_audio(&input)
        .context("error loading audio file")?;
    let prepared = pipeline
        .prepare(&audio)
        .context("error preparing audio for the detector")?;
    let detection = pipeline.detect(&prepared).context("watermark detection failed")?;
    let report = pipeline
        .interpret(detection)
        .context("failed to decode watermark message")?;

    tracing::info!(score = report.score(), "detection finished");

    println!();
    println!("--- DETECTION RESULTS ---");
    println!("{report}");

    Ok(())
}
