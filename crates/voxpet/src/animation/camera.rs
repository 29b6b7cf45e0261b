//! Camera rig that eases between gameplay and photo framing.

use glam::Vec3;
use voxpet_core::interaction::camera::{GAMEPLAY_EYE, GAMEPLAY_LOOK, PHOTO_EYE, PHOTO_LOOK};
use voxpet_core::PerspectiveCamera;

use super::tweens::{AnimatedValue, EaseType};

/// Tween progress per frame; a full move takes 25 frames
pub const FRAMING_STEP: f32 = 0.04;

/// Drives the eye and look-at point of a `PerspectiveCamera`.
///
/// Both tweens restart from wherever the camera currently is, so toggling
/// photo mode mid-move reverses smoothly instead of jumping.
#[derive(Debug, Clone)]
pub struct CameraRig {
    eye: AnimatedValue<Vec3>,
    look: AnimatedValue<Vec3>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            eye: AnimatedValue::new(GAMEPLAY_EYE),
            look: AnimatedValue::new(GAMEPLAY_LOOK),
        }
    }

    /// Close-up framing for photos
    pub fn frame_photo(&mut self) {
        self.eye.animate_to(PHOTO_EYE, EaseType::CubicOut);
        self.look.animate_to(PHOTO_LOOK, EaseType::CubicOut);
    }

    /// Back to the overview of the platform
    pub fn frame_gameplay(&mut self) {
        self.eye.animate_to(GAMEPLAY_EYE, EaseType::CubicOut);
        self.look.animate_to(GAMEPLAY_LOOK, EaseType::CubicOut);
    }

    /// Advance one frame and write the result into `camera`.
    ///
    /// Returns `true` while still moving.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let eye_moving = self.eye.step(FRAMING_STEP);
        let look_moving = self.look.step(FRAMING_STEP);
        camera.eye = self.eye.value();
        camera.look_at = self.look.value();
        eye_moving || look_moving
    }

    pub fn is_moving(&self) -> bool {
        self.eye.is_animating() || self.look.is_animating()
    }
}
