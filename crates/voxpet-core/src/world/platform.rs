//! The circular platform, its decor and the drifting clouds

use std::f32::consts::{PI, TAU};

use glam::{Affine3A, Quat, Vec3};
use voxpet_creature::palette::hex;
use voxpet_creature::{Color, SeedRng, WorldBox};

use crate::interaction::clamp_to_disc;
use crate::rng_trait::SimRng;

/// Fixed seed for decor, so every habitat looks the same
pub const DECOR_SEED: &str = "env";
pub const GRASS_BLADES: usize = 1000;
pub const ROCKS: usize = 8;
pub const CLOUDS: usize = 6;

pub const GROUND_COLOR: Color = hex(0x7CB342);
pub const GRASS_COLOR: Color = hex(0x558B2F);
pub const SOIL_COLOR: Color = hex(0x5D4037);
pub const STONE_COLOR: Color = hex(0x9E9E9E);
pub const CLOUD_COLOR: Color = [255, 255, 255, 128];

/// Cloud drift in units per ms
const CLOUD_SPEED: f32 = 0.002;
const CLOUD_WRAP: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrassBlade {
    pub position: Vec3,
    pub yaw: f32,
    pub height_scale: f32,
}

impl GrassBlade {
    pub const SIZE: Vec3 = Vec3::new(0.08, 0.4, 0.08);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rock {
    pub size: Vec3,
    pub position: Vec3,
    pub yaw: f32,
}

/// Static platform decoration, generated from `DECOR_SEED`
#[derive(Debug, Clone)]
pub struct Decor {
    pub grass: Vec<GrassBlade>,
    pub rocks: Vec<Rock>,
}

impl Decor {
    pub fn generate() -> Self {
        let mut rng = SeedRng::new(DECOR_SEED);

        let grass = (0..GRASS_BLADES)
            .map(|_| {
                let r = rng.range(0.0, 14.0);
                let theta = rng.range(0.0, TAU);
                let yaw = rng.range(0.0, PI);
                let height_scale = rng.range(0.8, 1.5);
                GrassBlade {
                    position: Vec3::new(r * theta.cos(), 0.0, r * theta.sin()),
                    yaw,
                    height_scale,
                }
            })
            .collect();

        let rocks = (0..ROCKS)
            .map(|_| {
                let size = Vec3::new(rng.range(0.4, 1.0), rng.range(0.2, 0.6), rng.range(0.4, 1.0));
                let x = rng.range(-12.0, 12.0);
                let z = rng.range(-12.0, 12.0);
                let yaw = rng.range(0.0, PI);
                Rock {
                    size,
                    position: Vec3::new(x, 0.1, z),
                    yaw,
                }
            })
            .collect();

        Self { grass, rocks }
    }

    /// Every decor box in world space (visual only, never picked)
    pub fn world_boxes(&self) -> impl Iterator<Item = WorldBox> + '_ {
        let blades = self.grass.iter().map(|blade| {
            let size = GrassBlade::SIZE * Vec3::new(1.0, blade.height_scale, 1.0);
            WorldBox {
                transform: Affine3A::from_scale_rotation_translation(
                    size,
                    Quat::from_rotation_y(blade.yaw),
                    blade.position + Vec3::new(0.0, size.y / 2.0, 0.0),
                ),
                color: GRASS_COLOR,
            }
        });
        let rocks = self.rocks.iter().map(|rock| WorldBox {
            transform: Affine3A::from_scale_rotation_translation(
                rock.size,
                Quat::from_rotation_y(rock.yaw),
                rock.position,
            ),
            color: STONE_COLOR,
        });
        blades.chain(rocks)
    }
}

#[derive(Debug, Clone)]
pub struct Cloud {
    pub position: Vec3,
    /// (edge length, offset from the cloud centre) per block
    pub blocks: Vec<(f32, Vec3)>,
}

impl Cloud {
    pub fn world_boxes(&self) -> impl Iterator<Item = WorldBox> + '_ {
        self.blocks.iter().map(|(s, offset)| WorldBox {
            transform: Affine3A::from_scale_rotation_translation(
                Vec3::new(*s, s * 0.6, *s),
                Quat::IDENTITY,
                self.position + *offset,
            ),
            color: CLOUD_COLOR,
        })
    }
}

/// The bounded play area
#[derive(Debug, Clone)]
pub struct Platform {
    /// Radius creature positions are confined to
    pub play_radius: f32,
    /// Radius of the visible ground disc
    pub radius: f32,
    pub decor: Decor,
    pub clouds: Vec<Cloud>,
}

impl Platform {
    pub fn new<R: SimRng + ?Sized>(play_radius: f32, radius: f32, rng: &mut R) -> Self {
        Self {
            play_radius,
            radius,
            decor: Decor::generate(),
            clouds: Self::generate_clouds(rng),
        }
    }

    fn generate_clouds<R: SimRng + ?Sized>(rng: &mut R) -> Vec<Cloud> {
        (0..CLOUDS)
            .map(|_| {
                let y = rng.gen_range_f32(50.0, 70.0);
                let z = rng.gen_centered() * 60.0;
                let x = rng.gen_centered() * 60.0;
                let count = 3 + (rng.gen_f32() * 4.0) as usize;
                let blocks = (0..count)
                    .map(|_| {
                        let s = rng.gen_range_f32(4.0, 7.0);
                        let offset = Vec3::new(rng.gen_centered() * 8.0, 0.0, rng.gen_centered() * 8.0);
                        (s, offset)
                    })
                    .collect();
                Cloud {
                    position: Vec3::new(x, y, z),
                    blocks,
                }
            })
            .collect()
    }

    /// Drift clouds along +X, wrapping at the far edge
    pub fn drift_clouds(&mut self, dt_ms: f32) {
        for cloud in &mut self.clouds {
            cloud.position.x += CLOUD_SPEED * dt_ms.max(0.0);
            if cloud.position.x > CLOUD_WRAP {
                cloud.position.x = -CLOUD_WRAP;
            }
        }
    }

    /// Keep a point inside the play area
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        clamp_to_disc(point, self.play_radius)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x.hypot(point.z) <= self.play_radius + 1e-4
    }
}
