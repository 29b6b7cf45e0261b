//! Simulation core for Voxpet
//!
//! This crate implements:
//! - Vital-stat decay, hazards and evolution with a throttled notifier
//! - The behavior state machine and its movement helpers
//! - Camera rays, pointer normalization and drag/chase targeting
//! - The habitat: platform, props, particles and the per-frame ordering

pub mod behavior;
pub mod config;
pub mod interaction;
pub mod rng_trait;
pub mod stats;
pub mod world;

// Re-export main types for convenience
pub use behavior::{BehaviorMachine, BehaviorState};
pub use config::{HazardTiming, SimConfig};
pub use interaction::{InputEvent, PerspectiveCamera, PointerEvent, Ray, TouchEvent, TouchPhase, Viewport};
pub use rng_trait::SimRng;
pub use stats::{MealOutcome, StatSimulator, StatsNotifier, TickContext, TickOutcome};
pub use world::{FrameReport, Habitat, ParticleKind};
