//! Food and waste props
//!
//! A prop registers its meshes with the ledger when spawned and gives them
//! back in `release`, which consumes the prop, so a removed prop cannot be
//! released twice.

use glam::{Affine3A, Quat, Vec3};
use voxpet_creature::model::BoxPrimitive;
use voxpet_creature::palette::hex;
use voxpet_creature::{Color, MeshLedger, WorldBox};

use crate::config::FoodRules;

pub const FOOD_COLOR: Color = hex(0xFFC107);
pub const LEAF_COLOR: Color = hex(0x4CAF50);
pub const WASTE_COLOR: Color = hex(0x795548);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Food,
    Waste,
}

/// Box layouts as (size, offset, color)
const FOOD_LAYOUT: &[(Vec3, Vec3, Color)] = &[
    (Vec3::new(0.4, 0.6, 0.4), Vec3::new(0.0, 0.3, 0.0), FOOD_COLOR),
    (Vec3::new(0.5, 0.4, 0.1), Vec3::new(0.0, 0.2, 0.2), LEAF_COLOR),
];
const WASTE_LAYOUT: &[(Vec3, Vec3, Color)] = &[
    (Vec3::new(0.3, 0.2, 0.3), Vec3::new(0.0, 0.1, 0.0), WASTE_COLOR),
    (Vec3::new(0.15, 0.15, 0.15), Vec3::new(0.0, 0.25, 0.0), WASTE_COLOR),
];

impl PropKind {
    fn layout(&self) -> &'static [(Vec3, Vec3, Color)] {
        match self {
            PropKind::Food => FOOD_LAYOUT,
            PropKind::Waste => WASTE_LAYOUT,
        }
    }
}

#[derive(Debug)]
pub struct Prop {
    pub kind: PropKind,
    pub position: Vec3,
    parts: Vec<BoxPrimitive>,
}

impl Prop {
    pub fn spawn(kind: PropKind, position: Vec3, ledger: &mut MeshLedger) -> Self {
        let parts = kind
            .layout()
            .iter()
            .map(|(size, offset, color)| BoxPrimitive {
                size: *size,
                offset: *offset,
                color: *color,
                mesh: ledger.alloc(),
            })
            .collect();
        Self {
            kind,
            position,
            parts,
        }
    }

    /// Give every mesh back to the ledger
    pub fn release(self, ledger: &mut MeshLedger) -> usize {
        ledger.release_all(self.parts.iter().map(|p| p.mesh))
    }

    pub fn world_boxes(&self) -> impl Iterator<Item = WorldBox> + '_ {
        self.parts.iter().map(|p| WorldBox {
            transform: Affine3A::from_scale_rotation_translation(
                p.size,
                Quat::IDENTITY,
                self.position + p.offset,
            ),
            color: p.color,
        })
    }

    /// Drop toward the resting height; returns true once landed
    pub fn fall(&mut self, dt_ms: f32, rules: &FoodRules) -> bool {
        if self.position.y > rules.rest_height {
            self.position.y = (self.position.y - rules.fall_speed * dt_ms.max(0.0)).max(rules.rest_height);
        }
        self.position.y <= rules.rest_height
    }

    /// Ground point under the prop
    pub fn ground_position(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_release_balance_ledger() {
        let mut ledger = MeshLedger::new();
        let food = Prop::spawn(PropKind::Food, Vec3::new(3.0, 6.0, 0.0), &mut ledger);
        let waste = Prop::spawn(PropKind::Waste, Vec3::ZERO, &mut ledger);
        assert_eq!(ledger.live_count(), 4);
        assert_eq!(food.world_boxes().count(), 2);

        assert_eq!(food.release(&mut ledger), 2);
        assert_eq!(waste.release(&mut ledger), 2);
        assert_eq!(ledger.live_count(), 0);
    }

    #[test]
    fn test_food_falls_to_rest() {
        let rules = FoodRules::default();
        let mut ledger = MeshLedger::new();
        let mut food = Prop::spawn(PropKind::Food, Vec3::new(3.0, 6.0, 0.0), &mut ledger);
        assert!(!food.fall(100.0, &rules));
        assert!((food.position.y - 5.0).abs() < 1e-5);
        assert!(food.fall(10_000.0, &rules));
        assert_eq!(food.position.y, rules.rest_height);
        assert_eq!(food.ground_position(), Vec3::new(3.0, 0.0, 0.0));
    }
}
