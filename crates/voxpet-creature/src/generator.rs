//! Deterministic procedural generator
//!
//! Builds a species part hierarchy from primitive boxes. Output depends only
//! on the seed, species and evolution stage. Draw order is fixed:
//! palette, trait flags, decorations, then the default-name suffix.

use std::f32::consts::PI;

use glam::Vec3;
use thiserror::Error;

use crate::ledger::MeshLedger;
use crate::model::{CreatureModel, NodeArena, RestPose, Transform};
use crate::palette::{
    self, CHICKEN_NAME_SUFFIXES, CHICKEN_PALETTES, ChickenPalette, PIG_NAME_SUFFIXES,
    PIG_PALETTES, PigPalette, SPOTTED_PALETTE, fixed,
};
use crate::parts::{ChickenParts, CombStyle, PigParts, SpeciesParts};
use crate::rng::SeedRng;
use crate::types::{Species, VitalStats};

/// Scale factor applied to every dimension once the creature has evolved
pub const EVOLVED_SCALE: f32 = 2.0;

/// Reasons a build can fail; `generate` recovers from all of them
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no blueprint for species `{0}`")]
    UnsupportedSpecies(Species),
    #[error("palette table for `{0}` is empty")]
    EmptyPalette(Species),
}

/// Model scale for an evolution stage
pub fn stage_scale(evolution_stage: u8) -> f32 {
    if evolution_stage > 0 { EVOLVED_SCALE } else { 1.0 }
}

/// A finished build before naming
struct Blueprint {
    model: CreatureModel,
    name_suffixes: &'static [&'static str],
}

/// Generate the creature described by `stats`
///
/// Falls back to a chicken (and rewrites `stats.species`) if the requested
/// species cannot be built; only a failure of that retry is returned.
/// Replaces `stats.name` only while it is still a placeholder.
pub fn generate(
    stats: &mut VitalStats,
    ledger: &mut MeshLedger,
) -> Result<CreatureModel, GenerationError> {
    let mut rng = SeedRng::new(&stats.seed);
    let scale = stage_scale(stats.evolution_stage);

    let blueprint = match build(stats.species, &mut rng, scale, ledger) {
        Ok(blueprint) => blueprint,
        Err(err) => {
            log::warn!("Generation failed ({}), falling back to chicken", err);
            stats.species = Species::Chicken;
            build_chicken(&mut rng, CHICKEN_PALETTES, scale, ledger)?
        }
    };

    if stats.has_placeholder_name() {
        let prefix = palette::name_prefix(blueprint.model.palette_name);
        // A miss (negative stream) lands on the first suffix.
        let suffix = rng
            .pick(blueprint.name_suffixes)
            .or_else(|| blueprint.name_suffixes.first())
            .copied()
            .unwrap_or_default();
        stats.name = format!("{} {}", prefix, suffix);
    }

    log::info!(
        "Generated {} '{}' from seed '{}' (palette {}, stage {}, {} boxes)",
        stats.species,
        stats.name,
        stats.seed,
        blueprint.model.palette_name,
        stats.evolution_stage,
        blueprint.model.box_count()
    );

    Ok(blueprint.model)
}

fn build(
    species: Species,
    rng: &mut SeedRng,
    scale: f32,
    ledger: &mut MeshLedger,
) -> Result<Blueprint, GenerationError> {
    match species {
        Species::Chicken => build_chicken(rng, CHICKEN_PALETTES, scale, ledger),
        Species::Pig => build_pig(rng, PIG_PALETTES, scale, ledger),
        Species::Unsupported => Err(GenerationError::UnsupportedSpecies(species)),
    }
}

fn build_chicken(
    rng: &mut SeedRng,
    palettes: &[ChickenPalette],
    s: f32,
    ledger: &mut MeshLedger,
) -> Result<Blueprint, GenerationError> {
    let first = palettes
        .first()
        .ok_or(GenerationError::EmptyPalette(Species::Chicken))?;
    let palette = *rng.pick(palettes).unwrap_or(first);
    let comb_roll = rng.range(0.0, 4.0).floor() as i32;
    let comb = CombStyle::from_roll(comb_roll);

    let body_w = 1.2 * s;
    let body_h = 1.1 * s;
    let body_d = 1.3 * s;
    let leg_h = 0.5 * s;

    let mut arena = NodeArena::new();
    let model = arena.add_root("model");

    let body_y = leg_h + body_h / 2.0;
    let body = arena.add_child(model, "body", Transform::from_translation(Vec3::new(0.0, body_y, 0.0)));
    arena.add_box(body, ledger, Vec3::new(body_w, body_h, body_d), Vec3::ZERO, palette.body);

    let chest_patch = rng.bool();
    if chest_patch {
        arena.add_box(
            body,
            ledger,
            Vec3::new(body_w * 0.7, body_h * 0.5, 0.1),
            Vec3::new(0.0, -body_h * 0.1, body_d / 2.0 + 0.05),
            fixed::CHEST_PATCH,
        );
    }

    // Head, eyes and beak
    let head_size = 0.8 * s;
    let head = arena.add_child(
        body,
        "head",
        Transform::from_translation(Vec3::new(0.0, body_h / 2.0, body_d / 3.0)),
    );
    arena.add_box(head, ledger, Vec3::splat(head_size), Vec3::new(0.0, head_size / 2.0, 0.0), palette.body);

    let eye_size = 0.12 * s;
    let eye_spread = head_size * 0.3;
    let eye_h = head_size * 0.6;
    let eye_d = head_size / 2.0 + 0.05;
    for side in [-1.0, 1.0] {
        arena.add_box(
            head,
            ledger,
            Vec3::new(eye_size, eye_size, 0.05),
            Vec3::new(side * eye_spread, eye_h, eye_d),
            fixed::EYE,
        );
    }
    let beak = 0.2 * s;
    arena.add_box(
        head,
        ledger,
        Vec3::new(beak, beak, beak * 1.5),
        Vec3::new(0.0, eye_h - 0.2 * s, eye_d + 0.1),
        fixed::BEAK,
    );

    let comb_node = arena.add_child(head, "comb", Transform::from_translation(Vec3::new(0.0, head_size, 0.0)));
    match comb {
        CombStyle::Mohawk => {
            for i in 0..3 {
                let step = i as f32;
                arena.add_box(
                    comb_node,
                    ledger,
                    Vec3::new(0.15 * s, 0.25 * s - step * 0.05, 0.2 * s),
                    Vec3::new(0.0, 0.1 * s, (step - 1.0) * 0.2 * s),
                    palette.comb,
                );
            }
        }
        CombStyle::Flat => {
            arena.add_box(
                comb_node,
                ledger,
                Vec3::new(0.2 * s, 0.1 * s, 0.4 * s),
                Vec3::new(0.0, 0.05 * s, -0.1 * s),
                palette.comb,
            );
        }
    }

    // Wings hinge at the body's sides
    let wing = Vec3::new(0.2 * s, 0.6 * s, 0.8 * s);
    let wings = [-1.0f32, 1.0].map(|side| {
        let node = arena.add_child(
            body,
            if side < 0.0 { "wing_left" } else { "wing_right" },
            Transform::from_translation(Vec3::new(side * body_w / 2.0, 0.2 * s, 0.0)),
        );
        arena.add_box(
            node,
            ledger,
            wing,
            Vec3::new(side * wing.x / 2.0, -wing.y / 3.0, 0.0),
            palette.secondary,
        );
        node
    });

    let tail = arena.add_child(
        body,
        "tail",
        Transform::from_translation(Vec3::new(0.0, 0.0, -body_d / 2.0))
            .with_rotation(Vec3::new(-PI / 6.0, 0.0, 0.0)),
    );
    arena.add_box(
        tail,
        ledger,
        Vec3::new(0.8 * s, 0.6 * s, 0.1 * s),
        Vec3::new(0.0, 0.3 * s, 0.0),
        palette.secondary,
    );

    // Legs hang from the model root so body bob does not drag them
    let leg_thick = 0.12 * s;
    let legs = [-1.0f32, 1.0].map(|side| {
        let node = arena.add_child(
            model,
            if side < 0.0 { "leg_left" } else { "leg_right" },
            Transform::from_translation(Vec3::new(side * body_w * 0.25, leg_h, 0.0)),
        );
        arena.add_box(node, ledger, Vec3::new(leg_thick, leg_h, leg_thick), Vec3::new(0.0, -leg_h / 2.0, 0.0), fixed::BEAK);
        arena.add_box(
            node,
            ledger,
            Vec3::new(0.4 * s, 0.1 * s, 0.5 * s),
            Vec3::new(0.0, -leg_h, 0.15 * s),
            fixed::BEAK,
        );
        node
    });

    let parts = SpeciesParts::Chicken(ChickenParts {
        body,
        head,
        tail,
        legs,
        wings,
        comb_roll,
        comb,
        chest_patch,
    });

    Ok(Blueprint {
        model: CreatureModel::new(
            arena,
            model,
            parts,
            Species::Chicken,
            palette.name,
            s,
            RestPose { body_height: body_y },
        ),
        name_suffixes: CHICKEN_NAME_SUFFIXES,
    })
}

fn build_pig(
    rng: &mut SeedRng,
    palettes: &[PigPalette],
    s: f32,
    ledger: &mut MeshLedger,
) -> Result<Blueprint, GenerationError> {
    let first = palettes
        .first()
        .ok_or(GenerationError::EmptyPalette(Species::Pig))?;
    let palette = *rng.pick(palettes).unwrap_or(first);

    let body_w = 1.3 * s;
    let body_h = 1.1 * s;
    let body_d = 1.6 * s;
    let leg_h = 0.4 * s;

    let mut arena = NodeArena::new();
    let model = arena.add_root("model");

    let body_y = leg_h + body_h / 2.0;
    let body = arena.add_child(model, "body", Transform::from_translation(Vec3::new(0.0, body_y, 0.0)));
    arena.add_box(body, ledger, Vec3::new(body_w, body_h, body_d), Vec3::ZERO, palette.body);

    // The coin is always drawn, even for palettes that cannot show spots.
    let spot_roll = rng.bool();
    let spotted = spot_roll && palette.name == SPOTTED_PALETTE;
    if spotted {
        let spot = Vec3::new(body_w * 0.2, body_h * 0.2, 0.1);
        arena.add_box(body, ledger, spot, Vec3::new(body_w / 2.0, 0.0, 0.0), fixed::SPOT);
        arena.add_box(body, ledger, spot, Vec3::new(-body_w / 2.0, 0.2, 0.4), fixed::SPOT);
    }

    let head_size = 0.9 * s;
    let head = arena.add_child(
        body,
        "head",
        Transform::from_translation(Vec3::new(0.0, body_h * 0.2, body_d / 2.0)),
    );
    arena.add_box(
        head,
        ledger,
        Vec3::new(head_size, head_size * 0.9, head_size * 0.8),
        Vec3::ZERO,
        palette.body,
    );

    let snout_w = head_size * 0.5;
    let snout_h = head_size * 0.4;
    arena.add_box(
        head,
        ledger,
        Vec3::new(snout_w, snout_h, 0.2 * s),
        Vec3::new(0.0, -0.1 * s, head_size / 2.0),
        palette.nose,
    );
    let nostril = 0.05 * s;
    for side in [-1.0, 1.0] {
        arena.add_box(
            head,
            ledger,
            Vec3::new(nostril, nostril, 0.05),
            Vec3::new(side * snout_w * 0.2, -0.1 * s, head_size / 2.0 + 0.1 * s),
            fixed::NOSTRIL,
        );
    }
    let eye_size = 0.12 * s;
    for side in [-1.0, 1.0] {
        arena.add_box(
            head,
            ledger,
            Vec3::new(eye_size, eye_size, 0.05),
            Vec3::new(side * head_size * 0.3, 0.15 * s, head_size / 2.0 - 0.1),
            fixed::EYE,
        );
    }

    let ear_w = 0.15 * s;
    let ear_h = 0.3 * s;
    let ears = [-1.0f32, 1.0].map(|side| {
        let node = arena.add_child(
            head,
            if side < 0.0 { "ear_left" } else { "ear_right" },
            Transform::from_translation(Vec3::new(side * head_size * 0.35, head_size * 0.4, -head_size * 0.1))
                .with_rotation(Vec3::new(0.0, 0.0, -side * PI / 6.0)),
        );
        arena.add_box(node, ledger, Vec3::new(ear_w, ear_h, 0.1 * s), Vec3::new(0.0, ear_h / 2.0, 0.0), palette.body);
        node
    });

    // Curly tail: two segments
    let tail = arena.add_child(
        body,
        "tail",
        Transform::from_translation(Vec3::new(0.0, body_h * 0.1, -body_d / 2.0)),
    );
    arena.add_box(tail, ledger, Vec3::new(0.1 * s, 0.1 * s, 0.3 * s), Vec3::new(0.0, 0.0, -0.15 * s), palette.nose);
    arena.add_box(tail, ledger, Vec3::new(0.1 * s, 0.3 * s, 0.1 * s), Vec3::new(0.0, 0.15 * s, -0.3 * s), palette.nose);

    // Front left, front right, back left, back right
    let leg_thick = 0.25 * s;
    let leg_names = ["leg_front_left", "leg_front_right", "leg_back_left", "leg_back_right"];
    let leg_spots = [(-1.0f32, 1.0f32), (1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];
    let mut legs = [model; 4];
    for (i, (x, z)) in leg_spots.into_iter().enumerate() {
        let node = arena.add_child(
            model,
            leg_names[i],
            Transform::from_translation(Vec3::new(x * body_w * 0.3, leg_h, z * body_d * 0.3)),
        );
        arena.add_box(node, ledger, Vec3::new(leg_thick, leg_h, leg_thick), Vec3::new(0.0, -leg_h / 2.0, 0.0), palette.secondary);
        arena.add_box(
            node,
            ledger,
            Vec3::new(leg_thick * 1.1, 0.1 * s, leg_thick * 1.1),
            Vec3::new(0.0, -leg_h, 0.0),
            fixed::HOOF,
        );
        legs[i] = node;
    }

    let parts = SpeciesParts::Pig(PigParts {
        body,
        head,
        tail,
        legs,
        ears,
        spotted,
    });

    Ok(Blueprint {
        model: CreatureModel::new(
            arena,
            model,
            parts,
            Species::Pig,
            palette.name,
            s,
            RestPose { body_height: body_y },
        ),
        name_suffixes: PIG_NAME_SUFFIXES,
    })
}
