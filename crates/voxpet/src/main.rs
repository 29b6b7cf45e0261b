use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ron::ser::PrettyConfig;
use voxpet::{GameConfig, ScriptedAction, SessionOptions, Species, VitalStats, load_stats, run_session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed string the creature is generated from
    #[arg(long, default_value = "voxpet")]
    seed: String,

    /// Species for a new creature: chicken, pig
    #[arg(long, default_value = "chicken")]
    species: Species,

    /// Name for a new creature (derived from its colours if omitted)
    #[arg(long)]
    name: Option<String>,

    /// Load a saved stats record (RON) instead of creating a new creature
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final stats record (RON) here
    #[arg(long)]
    save: Option<PathBuf>,

    /// Seconds to simulate (defaults to session.seconds from the config)
    #[arg(long)]
    seconds: Option<f32>,

    /// Care actions applied one per second: feed, clean, play, exercise, sleep, photo
    #[arg(long, value_delimiter = ',')]
    action: Vec<ScriptedAction>,

    /// Capture a PNG screenshot of the final frame
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Seed for live randomness (wandering, hazards, particles)
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Config file (RON); `voxpet.ron` is used when present
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = GameConfig::load_from(args.config.as_deref())?;

    let stats = match &args.load {
        Some(path) => load_stats(path)?,
        None => {
            let mut stats = VitalStats::new(args.seed.clone(), args.species);
            if let Some(name) = &args.name {
                stats.name = name.clone();
            }
            stats
        }
    };

    let options = SessionOptions {
        seconds: args.seconds,
        actions: args.action.clone(),
        screenshot: args.screenshot.clone(),
        rng_seed: args.rng_seed,
    };
    let report = run_session(stats, &config, &options)?;

    let record = ron::ser::to_string_pretty(&report.stats, PrettyConfig::default())
        .context("Failed to serialize final stats")?;
    log::info!(
        "{} frames, {} stats updates, {} of {} actions accepted",
        report.frames,
        report.emits,
        report.accepted.len(),
        options.actions.len()
    );
    if let Some(path) = &report.screenshot {
        log::info!("Screenshot: {}", path.display());
    }

    match &args.save {
        Some(path) => {
            std::fs::write(path, &record)
                .with_context(|| format!("Failed to write stats to {}", path.display()))?;
            log::info!("Stats saved to {}", path.display());
        }
        None => println!("{}", record),
    }

    Ok(())
}
