//! Voxpet: a procedurally generated voxel pet
//!
//! This crate wires the simulation core to a host:
//! - `Engine`, the facade a page or CLI drives frame by frame
//! - A CPU renderer with PNG screenshots
//! - Camera framing tweens for photo mode
//! - Layered configuration and headless sessions

pub mod animation;
pub mod config;
pub mod engine;
pub mod render;
pub mod scheduler;
pub mod screenshot;
pub mod session;

// Re-export main types for convenience
pub use config::{GameConfig, RenderConfig, SessionConfig};
pub use engine::Engine;
pub use scheduler::{FrameScheduler, InputChannel, InputListeners, ListenerId, ListenerRegistry};
pub use session::{ScriptedAction, SessionOptions, SessionReport, load_stats, run_session};
pub use voxpet_core::{InputEvent, PerspectiveCamera, PointerEvent, SimConfig, TouchEvent, TouchPhase, Viewport};
pub use voxpet_creature::{Species, VitalStats};
