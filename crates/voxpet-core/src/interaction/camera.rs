//! Perspective camera used for both rendering and picking

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use super::ray::Ray;

/// Gameplay framing: high and back, looking at the platform centre
pub const GAMEPLAY_EYE: Vec3 = Vec3::new(0.0, 24.0, 24.0);
pub const GAMEPLAY_LOOK: Vec3 = Vec3::ZERO;
/// Photo framing: close up, looking at the creature's body
pub const PHOTO_EYE: Vec3 = Vec3::new(0.0, 5.0, 7.0);
pub const PHOTO_LOOK: Vec3 = Vec3::new(0.0, 1.2, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: GAMEPLAY_EYE,
            look_at: GAMEPLAY_LOOK,
            fov_y: 40.0,
            aspect: 1.0,
            near: 0.1,
            far: 150.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, Vec3::Y)
    }

    /// OpenGL-style projection (NDC depth in [-1, 1])
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray from the eye through a normalized device coordinate
    ///
    /// Returns None when the camera matrices are degenerate.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.view_projection().inverse();
        let clip = inverse * ndc.extend(0.5).extend(1.0);
        if clip.w == 0.0 {
            return None;
        }
        let point = clip.xyz() / clip.w;
        Ray::new(self.eye, point - self.eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_ray_hits_look_target() {
        let camera = PerspectiveCamera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO).expect("ray");
        let hit = ray.intersect_ground(0.0).expect("ground hit");
        assert!(hit.length() < 1e-3);
    }

    #[test]
    fn test_upper_screen_points_further_away() {
        let camera = PerspectiveCamera::default();
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 0.5)).expect("ray");
        let hit = ray.intersect_ground(0.0).expect("ground hit");
        assert!(hit.z < 0.0);
    }

    #[test]
    fn test_projection_round_trip() {
        let camera = PerspectiveCamera::with_aspect(16.0 / 9.0);
        let world = Vec3::new(2.0, 0.0, 1.0);
        let clip = camera.view_projection() * world.extend(1.0);
        let ndc = clip.xy() / clip.w;
        let hit = camera
            .ray_from_ndc(ndc)
            .and_then(|ray| ray.intersect_ground(0.0))
            .expect("ground hit");
        assert!((hit - world).length() < 1e-3);
    }
}
