//! Headless sessions: drive an engine with a fixed frame step
//!
//! Used by the CLI to run a pet for a while without a display, optionally
//! applying care actions on a schedule and capturing a final screenshot.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use voxpet_creature::VitalStats;
use web_time::Instant;

use crate::config::GameConfig;
use crate::engine::Engine;
use crate::screenshot::save_png;

/// Gap between scripted actions
pub const ACTION_INTERVAL_MS: f64 = 1000.0;

/// A care action applied during a headless session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedAction {
    Feed,
    Clean,
    Play,
    Exercise,
    Sleep,
    /// Toggle photo mode
    Photo,
}

impl ScriptedAction {
    /// Apply to `engine`; returns whether the action was accepted
    pub fn apply(self, engine: &mut Engine) -> bool {
        match self {
            ScriptedAction::Feed => engine.feed(),
            ScriptedAction::Clean => engine.clean(),
            ScriptedAction::Play => engine.play(),
            ScriptedAction::Exercise => engine.start_exercise(),
            ScriptedAction::Sleep => engine.sleep(),
            ScriptedAction::Photo => {
                let enabled = engine.habitat().is_photo_mode();
                engine.set_photo_mode(!enabled)
            }
        }
    }
}

impl FromStr for ScriptedAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feed" => Ok(ScriptedAction::Feed),
            "clean" => Ok(ScriptedAction::Clean),
            "play" => Ok(ScriptedAction::Play),
            "exercise" => Ok(ScriptedAction::Exercise),
            "sleep" => Ok(ScriptedAction::Sleep),
            "photo" => Ok(ScriptedAction::Photo),
            _ => Err(format!(
                "Unknown action: {}. Valid: feed, clean, play, exercise, sleep, photo",
                s
            )),
        }
    }
}

/// What to run
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Overrides `session.seconds` from the config
    pub seconds: Option<f32>,
    /// Applied in order, one per second starting at the first frame
    pub actions: Vec<ScriptedAction>,
    pub screenshot: Option<PathBuf>,
    /// Fixes wandering, hazards and particles for a replayable run
    pub rng_seed: Option<u64>,
}

/// What happened
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub frames: u64,
    pub simulated_ms: f64,
    /// Snapshots delivered to the stats listener
    pub emits: usize,
    /// Actions the engine accepted
    pub accepted: Vec<ScriptedAction>,
    pub stats: VitalStats,
    pub screenshot: Option<PathBuf>,
}

/// Read a saved stats record
pub fn load_stats(path: &Path) -> Result<VitalStats> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stats from {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("Failed to parse stats in {}", path.display()))
}

/// Run `stats` for the configured duration and report the outcome
pub fn run_session(stats: VitalStats, config: &GameConfig, options: &SessionOptions) -> Result<SessionReport> {
    let frame_ms = config.session.frame_ms as f64;
    if !(frame_ms > 0.0) {
        bail!("Frame step must be positive, got {}", frame_ms);
    }
    let seconds = options.seconds.unwrap_or(config.session.seconds).max(0.0) as f64;
    let total_ms = seconds * 1000.0;

    let mut engine = match options.rng_seed {
        Some(seed) => Engine::with_rng_seed(stats, config, seed)?,
        None => Engine::new(stats, config)?,
    };

    let emits = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&emits);
    engine.on_stats(move |_| counter.set(counter.get() + 1));

    let started = Instant::now();
    let mut pending = options.actions.iter().copied();
    let mut accepted = Vec::new();
    let mut issued = 0u32;
    let mut frames = 0u64;
    let mut now_ms = 0.0;

    while now_ms <= total_ms {
        if now_ms >= issued as f64 * ACTION_INTERVAL_MS
            && let Some(action) = pending.next()
        {
            issued += 1;
            if action.apply(&mut engine) {
                log::info!("{:?} at {:.0} ms", action, now_ms);
                accepted.push(action);
            } else {
                log::warn!("{:?} refused at {:.0} ms", action, now_ms);
            }
        }

        if !engine.tick(now_ms) {
            break;
        }
        frames += 1;
        now_ms += frame_ms;
    }

    let screenshot = match &options.screenshot {
        Some(path) => {
            let png = engine.take_screenshot()?;
            save_png(&png, path)?;
            Some(path.clone())
        }
        None => None,
    };

    let stats = engine.stats();
    engine.dispose();
    log::info!(
        "Session finished: {} frames ({:.1} s simulated) in {:?}",
        frames,
        now_ms / 1000.0,
        started.elapsed()
    );

    Ok(SessionReport {
        frames,
        simulated_ms: now_ms,
        emits: emits.get(),
        accepted,
        stats,
        screenshot,
    })
}
