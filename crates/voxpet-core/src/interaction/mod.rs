//! Pointer-to-world interaction: picking, dragging and chase targets

pub mod camera;
pub mod drag;
pub mod pointer;
pub mod ray;

use glam::Vec2;

pub use camera::PerspectiveCamera;
pub use drag::{Grab, chase_target, clamp_to_disc};
pub use pointer::{InputEvent, PointerEvent, TouchEvent, TouchPhase, Viewport};
pub use ray::Ray;

/// Height of the plane drags and chase targets are projected onto
pub const GROUND_HEIGHT: f32 = 0.0;

/// Cast a ray from a client coordinate through the camera
pub fn screen_ray(camera: &PerspectiveCamera, viewport: &Viewport, client: Vec2) -> Option<Ray> {
    let ndc = viewport.to_ndc(client)?;
    camera.ray_from_ndc(ndc)
}
