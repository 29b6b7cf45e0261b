//! The habitat and everything that lives on the platform

pub mod habitat;
pub mod particles;
pub mod platform;
pub mod props;

pub use habitat::{FrameReport, Habitat};
pub use particles::{Particle, ParticleKind, ParticleSystem};
pub use platform::{Cloud, Decor, Platform};
pub use props::{Prop, PropKind};
