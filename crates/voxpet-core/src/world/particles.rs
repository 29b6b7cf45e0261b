//! Visual-only particle bursts for action feedback
//! Particles own nothing shared: each one moves, shrinks and expires on its own.

use glam::Vec3;
use voxpet_creature::Color;
use voxpet_creature::palette::hex;

use crate::config::REFERENCE_FRAME_MS;
use crate::rng_trait::SimRng;

/// Downward acceleration in units per frame per frame
const GRAVITY: f32 = 0.015;
/// Tumble speed in radians per frame
const SPIN: f32 = 0.2;

/// Effect families, each with its own look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// White puff when a creature is (re)generated
    Spawn,
    /// Gold shower on evolution
    Evolution,
    /// Pink hearts on play
    Play,
    /// Gold crumbs when a meal ends
    Eat,
    /// Brown bits when waste is cleaned up
    Dirt,
    /// Blue sparkles when waste is cleaned up
    Splash,
    /// Small blue drops while exercising
    Sweat,
}

impl ParticleKind {
    pub fn color(&self) -> Color {
        match self {
            ParticleKind::Spawn => hex(0xFFFFFF),
            ParticleKind::Evolution | ParticleKind::Eat => hex(0xFFD54F),
            ParticleKind::Play => hex(0xFF4081),
            ParticleKind::Dirt => hex(0x795548),
            ParticleKind::Splash | ParticleKind::Sweat => hex(0x4FC3F7),
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            ParticleKind::Sweat => 0.08,
            _ => 0.15,
        }
    }

    pub fn lifetime_ms(&self) -> f32 {
        match self {
            ParticleKind::Sweat => 500.0,
            _ => 800.0,
        }
    }

    fn spins(&self) -> bool {
        !matches!(self, ParticleKind::Sweat)
    }
}

/// A single visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec3,
    /// Units per reference frame
    pub velocity: Vec3,
    /// Tumble about X
    pub rotation: f32,
    pub age_ms: f32,
}

impl Particle {
    pub fn progress(&self) -> f32 {
        (self.age_ms / self.kind.lifetime_ms()).clamp(0.0, 1.0)
    }

    /// Edge length at the current age (shrinks linearly to zero)
    pub fn size(&self) -> f32 {
        self.kind.size() * (1.0 - self.progress())
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn is_alive(&self) -> bool {
        self.age_ms < self.kind.lifetime_ms()
    }
}

/// Manages a collection of visual particles
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleSystem {
    const DEFAULT_MAX_PARTICLES: usize = 500;

    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(Self::DEFAULT_MAX_PARTICLES),
            max_particles: Self::DEFAULT_MAX_PARTICLES,
        }
    }

    /// Update all particles: move them, age them, remove expired ones
    pub fn update(&mut self, dt_ms: f32) {
        let frames = dt_ms.max(0.0) / REFERENCE_FRAME_MS;
        for particle in &mut self.particles {
            particle.position += particle.velocity * frames;
            particle.velocity.y -= GRAVITY * frames;
            if particle.kind.spins() {
                particle.rotation += SPIN * frames;
            }
            particle.age_ms += dt_ms.max(0.0);
        }

        self.particles.retain(|p| p.is_alive());
    }

    /// Spawn a single particle
    pub fn spawn(&mut self, kind: ParticleKind, position: Vec3, velocity: Vec3) {
        // If at capacity, remove oldest particle
        if self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }

        self.particles.push(Particle {
            kind,
            position,
            velocity,
            rotation: 0.0,
            age_ms: 0.0,
        });
    }

    /// Spawn `count` particles scattered around `origin`, popping upward
    pub fn burst<R: SimRng + ?Sized>(
        &mut self,
        kind: ParticleKind,
        origin: Vec3,
        count: usize,
        rng: &mut R,
    ) {
        for _ in 0..count {
            let position =
                origin + Vec3::new(rng.gen_centered(), rng.gen_centered(), rng.gen_centered());
            let velocity = Vec3::new(
                rng.gen_centered() * 0.2,
                rng.gen_f32() * 0.3 + 0.1,
                rng.gen_centered() * 0.2,
            );
            self.spawn(kind, position, velocity);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of live particles of one kind
    pub fn count_kind(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
