//! Grab offsets, drag following and chase targets, confined to the platform

use glam::{Vec2, Vec3};

/// Pull a point back onto the disc of `radius` around the origin (XZ only)
pub fn clamp_to_disc(point: Vec3, radius: f32) -> Vec3 {
    let flat = Vec2::new(point.x, point.z);
    let dist = flat.length();
    if dist <= radius {
        return point;
    }
    let clamped = flat / dist * radius;
    Vec3::new(clamped.x, point.y, clamped.y)
}

/// An active grab on the creature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    /// Ground point under the cursor minus the root position at grab time
    pub offset: Vec3,
}

impl Grab {
    /// Start a grab; without a ground hit the root snaps to the cursor
    pub fn begin(ground_hit: Option<Vec3>, root: Vec3) -> Self {
        Self {
            offset: ground_hit.map(|hit| hit - root).unwrap_or(Vec3::ZERO),
        }
    }

    /// New horizontal root position for a cursor ground hit
    ///
    /// None if the result is not finite; the caller skips the update.
    pub fn follow(&self, ground_hit: Vec3, radius: f32) -> Option<Vec3> {
        let target = ground_hit - self.offset;
        if !target.x.is_finite() || !target.z.is_finite() {
            return None;
        }
        Some(clamp_to_disc(target, radius))
    }
}

/// Chase target for a cursor ground hit
pub fn chase_target(ground_hit: Vec3, radius: f32) -> Option<Vec3> {
    ground_hit
        .is_finite()
        .then(|| clamp_to_disc(ground_hit, radius))
}
