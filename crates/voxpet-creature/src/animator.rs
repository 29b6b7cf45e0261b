//! Procedural part animation
//!
//! Every function poses the model's parts through `PartRig`, so one code
//! path drives every species. `time` is wall time in seconds; the body's
//! vertical motion is an offset from the rest height recorded at generation.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use crate::model::CreatureModel;
use crate::parts::{AppendageKind, Gait, PartRig};

/// Weight at which the body starts widening
pub const NORMAL_WEIGHT: f32 = 50.0;
/// Slowest a heavy creature can move, as a fraction of normal speed
pub const MIN_SPEED_MODIFIER: f32 = 0.3;
/// Per-frame smoothing toward the fat-scale target
const FAT_LERP: f32 = 0.1;

/// Model height while asleep (lying on its side)
const SLEEP_HEIGHT: f32 = 0.5;

/// 0 at or below normal weight, 0.5 at weight 100
pub fn weight_factor(weight: f32) -> f32 {
    (weight - NORMAL_WEIGHT).max(0.0) / 100.0
}

/// Body scale the fat mechanic converges to: wider on X/Z, squashed on Y
pub fn fat_scale_target(weight: f32) -> (f32, f32) {
    let wf = weight_factor(weight);
    (1.0 + wf * 1.5, 1.0 - wf * 0.2)
}

/// Movement multiplier for a given weight
pub fn speed_modifier(weight: f32) -> f32 {
    (1.0 - weight_factor(weight)).max(MIN_SPEED_MODIFIER)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Ease the body scale toward the weight's fat target
pub fn apply_fat_scale(model: &mut CreatureModel, weight: f32) {
    let (wide, tall) = fat_scale_target(weight);
    let body = model.parts.body();
    let scale = &mut model.arena.transform_mut(body).scale;
    scale.x = lerp(scale.x, wide, FAT_LERP);
    scale.z = lerp(scale.z, wide, FAT_LERP);
    scale.y = lerp(scale.y, tall, FAT_LERP);
}

fn set_body_height(model: &mut CreatureModel, offset: f32) {
    let rest = model.rest.body_height;
    let body = model.parts.body();
    model.arena.transform_mut(body).translation.y = rest + offset;
}

fn set_body_pitch(model: &mut CreatureModel, pitch: f32) {
    let body = model.parts.body();
    model.arena.transform_mut(body).rotation.x = pitch;
}

fn for_each_leg(model: &mut CreatureModel, mut pose: impl FnMut(usize) -> f32) {
    let legs = model.parts.legs().to_vec();
    for (i, leg) in legs.into_iter().enumerate() {
        model.arena.transform_mut(leg).rotation.x = pose(i);
    }
}

/// Rotate each appendage around Z; `pose` gets the index, the kind and the
/// current angle
fn for_each_appendage(
    model: &mut CreatureModel,
    mut pose: impl FnMut(usize, AppendageKind, f32) -> f32,
) {
    let Some(appendages) = model.parts.appendages() else {
        return;
    };
    let kind = appendages.kind;
    let nodes = appendages.nodes.to_vec();
    for (i, node) in nodes.into_iter().enumerate() {
        let rotation = &mut model.arena.transform_mut(node).rotation;
        rotation.z = pose(i, kind, rotation.z);
    }
}

/// Mirror sign for the left (first) and right appendage
fn side_sign(i: usize) -> f32 {
    if i == 0 { 1.0 } else { -1.0 }
}

/// Gentle breathing bob and appendage sway
pub fn breathe(model: &mut CreatureModel, time: f32) {
    let body = model.parts.body();
    let rest = model.rest.body_height;
    let y = &mut model.arena.transform_mut(body).translation.y;
    *y = *y * 0.9 + (rest + (time * 3.0).sin() * 0.05) * 0.1;

    for_each_appendage(model, |i, kind, _| match kind {
        AppendageKind::Wing => (time * 5.0).sin() * 0.1,
        AppendageKind::Ear => side_sign(i) * (FRAC_PI_6 + (time * 2.0).sin() * 0.05),
    });
}

/// Hop and swing the legs; `speed` multiplies the cycle frequency
pub fn walk_cycle(model: &mut CreatureModel, time: f32, speed: f32) {
    set_body_height(model, (time * 12.0 * speed).sin().abs() * 0.4);

    let swing = (time * 15.0 * speed).sin();
    match model.parts.gait() {
        Gait::Biped => for_each_leg(model, |i| side_sign(i) * swing * 0.8),
        // Diagonal pairs: front-left with back-right
        Gait::Quadruped => for_each_leg(model, |i| {
            let sign = if i == 0 || i == 3 { 1.0 } else { -1.0 };
            sign * swing * 0.6
        }),
    }
}

/// Legs straight down
pub fn rest_legs(model: &mut CreatureModel) {
    for_each_leg(model, |_| 0.0);
}

/// Body back at rest height
pub fn settle_body(model: &mut CreatureModel) {
    set_body_height(model, 0.0);
}

/// Quick shallow bob after a sprint
pub fn pant(model: &mut CreatureModel, time: f32) {
    set_body_height(model, (time * 20.0).sin() * 0.05);
}

/// Peck or chomp by pitching the body forward
pub fn bite(model: &mut CreatureModel, time: f32) {
    set_body_pitch(model, (time * 20.0).sin().abs() * 0.5);
}

pub fn end_bite(model: &mut CreatureModel) {
    set_body_pitch(model, 0.0);
}

/// Excited bounce with fast wing flaps
pub fn play_bounce(model: &mut CreatureModel, time: f32) {
    set_body_height(model, (time * 15.0).sin().abs());
    for_each_appendage(model, |_, kind, current| match kind {
        AppendageKind::Wing => (time * 30.0).sin(),
        AppendageKind::Ear => current,
    });
}

pub fn end_play(model: &mut CreatureModel) {
    settle_body(model);
    for_each_appendage(model, |_, kind, current| match kind {
        AppendageKind::Wing => 0.0,
        AppendageKind::Ear => current,
    });
}

/// Dangling from the cursor: flailing legs, spread wings, wobbling ears
pub fn drag_flail(model: &mut CreatureModel, time: f32) {
    for_each_leg(model, |i| (time * 20.0 + i as f32).sin() * 0.5 + 0.5);
    let wobble = (time * 40.0).sin();
    for_each_appendage(model, |_, kind, current| match kind {
        AppendageKind::Wing => FRAC_PI_4 + wobble * 0.5,
        AppendageKind::Ear => current + wobble * 0.2,
    });
    set_body_pitch(model, 0.2);
}

/// Lie on the side
pub fn sleep_pose(model: &mut CreatureModel) {
    let transform = model.model_transform_mut();
    transform.rotation.z = FRAC_PI_2;
    transform.translation.y = SLEEP_HEIGHT;
}

/// Model subtree upright at the origin
pub fn reset_model(model: &mut CreatureModel) {
    let transform = model.model_transform_mut();
    transform.rotation = glam::Vec3::ZERO;
    transform.translation = glam::Vec3::ZERO;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::ledger::MeshLedger;
    use crate::types::{Species, VitalStats};

    fn model_for(species: Species) -> CreatureModel {
        let mut stats = VitalStats::new("anim", species);
        let mut ledger = MeshLedger::new();
        generate(&mut stats, &mut ledger).expect("generation succeeds")
    }

    fn leg_angles(model: &CreatureModel) -> Vec<f32> {
        model
            .parts
            .legs()
            .iter()
            .map(|leg| model.arena.transform(*leg).rotation.x)
            .collect()
    }

    #[test]
    fn test_weight_helpers() {
        assert_eq!(weight_factor(40.0), 0.0);
        assert!((weight_factor(100.0) - 0.5).abs() < 1e-6);
        assert_eq!(fat_scale_target(50.0), (1.0, 1.0));
        let (wide, tall) = fat_scale_target(90.0);
        assert!((wide - 1.6).abs() < 1e-6);
        assert!((tall - 0.92).abs() < 1e-6);
        assert_eq!(speed_modifier(100.0), 0.5);
        assert_eq!(speed_modifier(30.0), 1.0);
    }

    #[test]
    fn test_fat_scale_converges() {
        let mut model = model_for(Species::Pig);
        for _ in 0..200 {
            apply_fat_scale(&mut model, 90.0);
        }
        let scale = model.arena.transform(model.parts.body()).scale;
        assert!((scale.x - 1.6).abs() < 1e-3);
        assert!((scale.z - 1.6).abs() < 1e-3);
        assert!((scale.y - 0.92).abs() < 1e-3);
    }

    #[test]
    fn test_biped_legs_in_antiphase() {
        let mut model = model_for(Species::Chicken);
        walk_cycle(&mut model, 0.1, 1.0);
        let angles = leg_angles(&model);
        assert!(angles[0] != 0.0);
        assert!((angles[0] + angles[1]).abs() < 1e-6);
    }

    #[test]
    fn test_quadruped_diagonal_pairs() {
        let mut model = model_for(Species::Pig);
        walk_cycle(&mut model, 0.1, 1.0);
        let angles = leg_angles(&model);
        assert_eq!(angles[0], angles[3]);
        assert_eq!(angles[1], angles[2]);
        assert!((angles[0] + angles[1]).abs() < 1e-6);

        rest_legs(&mut model);
        assert!(leg_angles(&model).iter().all(|a| *a == 0.0));
    }

    #[test]
    fn test_ears_mirror_while_breathing() {
        let mut model = model_for(Species::Pig);
        breathe(&mut model, 1.3);
        let ears = model.parts.appendages().expect("pig has ears").nodes.to_vec();
        let left = model.arena.transform(ears[0]).rotation.z;
        let right = model.arena.transform(ears[1]).rotation.z;
        assert!(left > 0.0);
        assert!((left + right).abs() < 1e-6);
    }

    #[test]
    fn test_bob_is_relative_to_rest_height() {
        let mut model = model_for(Species::Chicken);
        walk_cycle(&mut model, 0.0, 1.0);
        let body = model.parts.body();
        assert!((model.arena.transform(body).translation.y - model.rest.body_height).abs() < 1e-6);
        play_bounce(&mut model, 0.1);
        end_play(&mut model);
        assert!((model.arena.transform(body).translation.y - model.rest.body_height).abs() < 1e-6);
    }

    #[test]
    fn test_sleep_pose_and_reset() {
        let mut model = model_for(Species::Chicken);
        sleep_pose(&mut model);
        assert_eq!(model.model_transform().rotation.z, FRAC_PI_2);
        assert_eq!(model.model_transform().translation.y, SLEEP_HEIGHT);
        reset_model(&mut model);
        assert_eq!(model.model_transform().rotation, glam::Vec3::ZERO);
    }

    #[test]
    fn test_drag_flail_pitches_body() {
        let mut model = model_for(Species::Chicken);
        drag_flail(&mut model, 0.5);
        let body = model.parts.body();
        assert_eq!(model.arena.transform(body).rotation.x, 0.2);
        end_bite(&mut model);
        assert_eq!(model.arena.transform(body).rotation.x, 0.0);
    }
}
