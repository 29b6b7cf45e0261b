//! Game configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `voxpet.ron` file (if exists)
//! 3. Environment variables prefixed with `VOXPET_`
//!
//! Example environment variable: `VOXPET_RENDER__WIDTH=1024`

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use voxpet_core::SimConfig;

/// Main game configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Render target settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Keep the last frame readable after it is presented
    pub preserve_drawing_buffer: bool,
    /// Rasterize every frame; headless runs turn this off and only render
    /// for screenshots
    pub continuous: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            preserve_drawing_buffer: true,
            continuous: true,
        }
    }
}

/// Headless session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed frame step in milliseconds
    pub frame_ms: f32,
    /// Default run length in seconds
    pub seconds: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_ms: 1000.0 / 60.0,
            seconds: 10.0,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl GameConfig {
    /// Load from `voxpet.ron` in the working directory plus environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path`, or `voxpet.ron` if none is given (optional only in the
    ///    latter case)
    /// 3. Environment variables prefixed with `VOXPET_` (highest priority)
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let defaults = RenderConfig::default();
        let session = SessionConfig::default();

        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("voxpet").format(FileFormat::Ron).required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("render.width", defaults.width as i64)?
            .set_default("render.height", defaults.height as i64)?
            .set_default("render.preserve_drawing_buffer", defaults.preserve_drawing_buffer)?
            .set_default("render.continuous", defaults.continuous)?
            .set_default("session.frame_ms", session.frame_ms as f64)?
            .set_default("session.seconds", session.seconds as f64)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (VOXPET_RENDER__WIDTH, etc.)
            .add_source(Environment::with_prefix("VOXPET").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        log::info!(
            "Config loaded: {}x{} render, {:.1} ms frames",
            loaded.render.width,
            loaded.render.height,
            loaded.session.frame_ms
        );
        Ok(loaded)
    }
}
