//! Seeded voxel creatures for Voxpet
//!
//! This crate implements:
//! - A deterministic string-seeded random stream
//! - Procedural chicken and pig models built from primitive boxes
//! - A species-agnostic part rig and procedural animator
//! - The persisted vital-stats record
//! - A mesh ledger that tracks every allocated primitive

pub mod animator;
pub mod generator;
pub mod ledger;
pub mod model;
pub mod palette;
pub mod parts;
pub mod rng;
pub mod types;

// Re-export main types for convenience
pub use generator::{GenerationError, generate};
pub use ledger::MeshLedger;
pub use model::{CreatureModel, NodeId, Transform, WorldBox};
pub use palette::Color;
pub use parts::{Gait, PartRig, SpeciesParts};
pub use rng::SeedRng;
pub use types::{EntityId, Species, VitalStats};
