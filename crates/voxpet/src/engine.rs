//! The engine: the surface a host page or the CLI drives
//!
//! One `Engine` owns one habitat plus everything needed to present it:
//! camera, camera rig, renderer and the outward stats listeners. The host
//! forwards display refreshes to `tick` and raw input to `handle_input`.

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use voxpet_core::{Habitat, InputEvent, PerspectiveCamera, Viewport};
use voxpet_creature::VitalStats;

use crate::animation::CameraRig;
use crate::config::GameConfig;
use crate::render::{PixelRenderer, render_habitat};
use crate::scheduler::{FrameScheduler, InputListeners, ListenerId, ListenerRegistry};
use crate::screenshot::encode_png;

pub struct Engine {
    habitat: Habitat,
    rng: Xoshiro256StarStar,
    scheduler: FrameScheduler,
    camera: PerspectiveCamera,
    rig: CameraRig,
    viewport: Viewport,
    renderer: PixelRenderer,
    continuous: bool,
    stats_listeners: ListenerRegistry<VitalStats>,
    inputs: InputListeners,
    disposed: bool,
}

impl Engine {
    /// Build an engine with a randomly seeded simulation RNG
    pub fn new(stats: VitalStats, config: &GameConfig) -> Result<Self> {
        Self::with_rng_seed(stats, config, rand::random())
    }

    /// Build an engine whose live randomness (wandering, hazards,
    /// particles) replays exactly for a given seed
    pub fn with_rng_seed(stats: VitalStats, config: &GameConfig, rng_seed: u64) -> Result<Self> {
        let render = &config.render;
        if render.width == 0 || render.height == 0 {
            bail!("Render target must be non-empty, got {}x{}", render.width, render.height);
        }

        let mut rng = Xoshiro256StarStar::seed_from_u64(rng_seed);
        let habitat = Habitat::new(stats, config.sim.clone(), &mut rng)?;
        let viewport = Viewport::new(render.width as f32, render.height as f32);
        log::info!(
            "Engine started for {} ({}) at {}x{}",
            habitat.stats().name,
            habitat.stats().species,
            render.width,
            render.height
        );

        Ok(Self {
            habitat,
            rng,
            scheduler: FrameScheduler::new(),
            camera: PerspectiveCamera::with_aspect(viewport.aspect()),
            rig: CameraRig::new(),
            viewport,
            renderer: PixelRenderer::new(
                render.width as usize,
                render.height as usize,
                render.preserve_drawing_buffer,
            ),
            continuous: render.continuous,
            stats_listeners: ListenerRegistry::new(),
            inputs: InputListeners::attached(),
            disposed: false,
        })
    }

    // --- Frame loop ---

    /// Run one frame at host time `now_ms`
    ///
    /// Returns false once the engine is disposed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(dt_ms) = self.scheduler.tick(now_ms) else {
            return false;
        };

        let report = self.habitat.frame(now_ms, dt_ms, &mut self.rng);
        self.rig.update(&mut self.camera);
        if report.emit_stats {
            let snapshot = self.habitat.stats().clone();
            self.stats_listeners.emit(&snapshot);
        }
        if self.continuous {
            render_habitat(&mut self.renderer, &self.habitat, &self.camera);
            self.renderer.present();
        }
        true
    }

    // --- Actions ---

    pub fn load_state(&mut self, stats: VitalStats) {
        if self.disposed {
            return;
        }
        self.habitat.load_state(stats, &mut self.rng);
    }

    pub fn feed(&mut self) -> bool {
        !self.disposed && self.habitat.feed(&mut self.rng)
    }

    pub fn clean(&mut self) -> bool {
        !self.disposed && self.habitat.clean(&mut self.rng)
    }

    pub fn play(&mut self) -> bool {
        !self.disposed && self.habitat.play(&mut self.rng)
    }

    pub fn start_exercise(&mut self) -> bool {
        !self.disposed && self.habitat.start_exercise()
    }

    /// Toggle sleep
    pub fn sleep(&mut self) -> bool {
        !self.disposed && self.habitat.sleep()
    }

    /// Freeze the simulation and ease the camera into close-up framing,
    /// or back out again
    pub fn set_photo_mode(&mut self, enabled: bool) -> bool {
        if self.disposed || !self.habitat.set_photo_mode(enabled) {
            return false;
        }
        if enabled {
            self.rig.frame_photo();
        } else {
            self.rig.frame_gameplay();
        }
        true
    }

    pub fn set_pet_rotation(&mut self, angle: f32) -> bool {
        !self.disposed && self.habitat.set_pet_rotation(angle)
    }

    /// Render the current frame and return it as PNG bytes
    pub fn take_screenshot(&mut self) -> Result<Vec<u8>> {
        if self.disposed {
            bail!("Engine is disposed");
        }
        render_habitat(&mut self.renderer, &self.habitat, &self.camera);
        encode_png(&self.renderer.buffer, self.renderer.width, self.renderer.height)
    }

    /// PNG of whatever the render target currently holds, without drawing
    ///
    /// Only meaningful with a preserved drawing buffer; otherwise the last
    /// presented frame is already gone.
    pub fn read_back(&self) -> Result<Vec<u8>> {
        encode_png(&self.renderer.buffer, self.renderer.width, self.renderer.height)
    }

    // --- Observation ---

    /// Current stats snapshot
    pub fn stats(&self) -> VitalStats {
        self.habitat.stats().clone()
    }

    /// Receive stats snapshots, at most once per notify interval
    pub fn on_stats(&mut self, listener: impl FnMut(&VitalStats) + 'static) -> Option<ListenerId> {
        if self.disposed {
            return None;
        }
        Some(self.stats_listeners.add(listener))
    }

    pub fn off_stats(&mut self, id: ListenerId) -> bool {
        self.stats_listeners.remove(id)
    }

    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn inputs_mut(&mut self) -> &mut InputListeners {
        &mut self.inputs
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // --- Input ---

    /// Route raw host input through the habitat
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.disposed || !self.inputs.accepts(event) {
            return false;
        }
        let Some(pointer) = event.normalize() else {
            return false;
        };
        self.habitat
            .pointer(pointer, &self.camera, &self.viewport, &mut self.rng)
    }

    /// Resize the render target and keep picking in step with it
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        self.viewport = Viewport::new(width as f32, height as f32);
        self.camera.aspect = self.viewport.aspect();
        self.renderer.resize(width as usize, height as usize);
    }

    /// Move the render surface within the host page
    pub fn set_viewport_origin(&mut self, left: f32, top: f32) {
        self.viewport.left = left;
        self.viewport.top = top;
    }

    // --- Teardown ---

    /// Stop the frame loop, detach every listener, then free resources
    ///
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.cancel();
        self.inputs.detach_all();
        self.stats_listeners.clear();
        self.habitat.dispose();
        self.renderer.release();
        self.disposed = true;
        log::info!("Engine disposed after {} frames", self.scheduler.frames());
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use voxpet_creature::Species;

    fn engine() -> Engine {
        let mut config = GameConfig::default();
        config.render.width = 64;
        config.render.height = 48;
        config.render.continuous = false;
        Engine::with_rng_seed(VitalStats::new("engine", Species::Chicken), &config, 7)
            .expect("engine builds")
    }

    #[test]
    fn test_empty_render_target_rejected() {
        let mut config = GameConfig::default();
        config.render.width = 0;
        assert!(Engine::new(VitalStats::default(), &config).is_err());
    }

    #[test]
    fn test_dispose_cancels_and_detaches() {
        let mut engine = engine();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        engine.on_stats(move |_| counter.set(counter.get() + 1));
        assert!(engine.tick(0.0));

        engine.dispose();
        engine.dispose();
        assert!(engine.is_disposed());
        assert!(!engine.tick(1000.0));
        assert!(!engine.feed());
        assert!(engine.on_stats(|_| {}).is_none());
        assert!(engine.take_screenshot().is_err());
        assert_eq!(engine.habitat().ledger().live_count(), 0);
        assert_eq!(calls.get(), 1, "only the first frame notified");
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut engine = engine();
        engine.resize(200, 100);
        assert_eq!(engine.camera().aspect, 2.0);
        assert_eq!(engine.viewport().width, 200.0);
        engine.resize(0, 100);
        assert_eq!(engine.viewport().width, 200.0);
    }
}
