//! Ray queries against the ground plane and the creature's boxes

use glam::Vec3;
use voxpet_creature::WorldBox;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; None if the direction is zero or non-finite
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the horizontal plane `y = height`
    ///
    /// None when the ray is parallel to the plane, points away from it, or
    /// the result is not finite.
    pub fn intersect_ground(&self, height: f32) -> Option<Vec3> {
        if self.direction.y == 0.0 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        if t < 0.0 {
            return None;
        }
        let point = self.at(t);
        point.is_finite().then_some(point)
    }

    /// Distance along the ray to an oriented box, if hit
    ///
    /// The ray is moved into the box's unit-cube space, where a slab test
    /// against `[-0.5, 0.5]^3` gives the same parametric distance.
    pub fn hit_box(&self, world_box: &WorldBox) -> Option<f32> {
        let inverse = world_box.transform.inverse();
        let origin = inverse.transform_point3(self.origin);
        let dir = inverse.transform_vector3(self.direction);
        if !origin.is_finite() || !dir.is_finite() {
            return None;
        }

        let inv = Vec3::new(
            if dir.x != 0.0 { 1.0 / dir.x } else { f32::MAX },
            if dir.y != 0.0 { 1.0 / dir.y } else { f32::MAX },
            if dir.z != 0.0 { 1.0 / dir.z } else { f32::MAX },
        );
        let t1 = (Vec3::splat(-0.5) - origin) * inv;
        let t2 = (Vec3::splat(0.5) - origin) * inv;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        if tmax < 0.0 || tmin > tmax {
            None
        } else {
            Some(if tmin < 0.0 { tmax } else { tmin })
        }
    }

    /// Nearest hit among `boxes`
    pub fn pick<'a>(&self, boxes: impl IntoIterator<Item = &'a WorldBox>) -> Option<f32> {
        boxes
            .into_iter()
            .filter_map(|b| self.hit_box(b))
            .min_by(|a, b| a.total_cmp(b))
    }
}
