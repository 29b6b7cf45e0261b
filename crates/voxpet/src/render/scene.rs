//! Draws a habitat through the pixel renderer
//!
//! Opaque geometry goes first so translucent layers (shadow, clouds) blend
//! over the finished depth buffer.

use std::f32::consts::TAU;

use glam::{Affine3A, Quat, Vec3};
use voxpet_core::world::platform::{GROUND_COLOR, SOIL_COLOR};
use voxpet_core::{Habitat, PerspectiveCamera};
use voxpet_creature::palette::hex;
use voxpet_creature::{Color, WorldBox};

use super::pixel_renderer::{FrameCamera, PixelRenderer, shade};

pub const SKY_COLOR: Color = hex(0x87CEEB);
const SHADOW_COLOR: Color = [0, 0, 0, 77];
const SHADOW_RADIUS: f32 = 0.9;
/// Ground slab thickness below y = 0
const SOIL_DEPTH: f32 = 1.0;
const DISC_SEGMENTS: usize = 48;

/// Render one frame of `habitat` as seen by `camera`
pub fn render_habitat(renderer: &mut PixelRenderer, habitat: &Habitat, camera: &PerspectiveCamera) {
    let frame = FrameCamera {
        view_projection: camera.view_projection(),
        eye: camera.eye,
    };
    renderer.clear(SKY_COLOR);

    draw_ground(renderer, &frame, habitat.platform().radius);
    for decor in habitat.platform().decor.world_boxes() {
        renderer.draw_box(&frame, &decor);
    }

    for part in habitat.creature_boxes() {
        renderer.draw_box(&frame, &part);
    }
    if let Some(food) = habitat.food() {
        for part in food.world_boxes() {
            renderer.draw_box(&frame, &part);
        }
    }
    for waste in habitat.waste() {
        for part in waste.world_boxes() {
            renderer.draw_box(&frame, &part);
        }
    }
    for particle in habitat.particles().iter() {
        let size = particle.size();
        if size <= 0.0 {
            continue;
        }
        renderer.draw_box(
            &frame,
            &WorldBox {
                transform: Affine3A::from_scale_rotation_translation(
                    Vec3::splat(size),
                    Quat::from_rotation_x(particle.rotation),
                    particle.position,
                ),
                color: particle.color(),
            },
        );
    }

    if habitat.shadow_visible() {
        let root = habitat.root().translation;
        draw_disc(
            renderer,
            &frame,
            Vec3::new(root.x, 0.02, root.z),
            SHADOW_RADIUS,
            SHADOW_COLOR,
        );
    }
    for cloud in &habitat.platform().clouds {
        for block in cloud.world_boxes() {
            renderer.draw_box(&frame, &block);
        }
    }
}

/// Grass disc on top, soil band around the rim
fn draw_ground(renderer: &mut PixelRenderer, frame: &FrameCamera, radius: f32) {
    draw_disc(renderer, frame, Vec3::ZERO, radius, shade(GROUND_COLOR, Vec3::Y));

    for i in 0..DISC_SEGMENTS {
        let (a, b) = rim(i, radius);
        let normal = ((a + b) * 0.5).normalize_or_zero();
        if normal.dot(frame.eye - a) <= 0.0 {
            continue;
        }
        let color = shade(SOIL_COLOR, normal);
        let down = Vec3::new(0.0, -SOIL_DEPTH, 0.0);
        renderer.draw_triangle(frame, [a, b, b + down], color);
        renderer.draw_triangle(frame, [a, b + down, a + down], color);
    }
}

fn draw_disc(renderer: &mut PixelRenderer, frame: &FrameCamera, centre: Vec3, radius: f32, color: Color) {
    for i in 0..DISC_SEGMENTS {
        let (a, b) = rim(i, radius);
        renderer.draw_triangle(frame, [centre, centre + a, centre + b], color);
    }
}

/// Endpoints of rim segment `i`, relative to the disc centre
fn rim(i: usize, radius: f32) -> (Vec3, Vec3) {
    let angle = |k: usize| k as f32 / DISC_SEGMENTS as f32 * TAU;
    let (a, b) = (angle(i), angle(i + 1));
    (
        Vec3::new(a.cos() * radius, 0.0, a.sin() * radius),
        Vec3::new(b.cos() * radius, 0.0, b.sin() * radius),
    )
}
