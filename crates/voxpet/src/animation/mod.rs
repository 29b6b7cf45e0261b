//! Eased tweens and the camera rig built on them.

mod camera;
mod tweens;

pub use camera::{CameraRig, FRAMING_STEP};
pub use tweens::{AnimatedValue, EaseType, Tweenable};
