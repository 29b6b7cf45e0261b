use glam::Vec3;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use voxpet_core::interaction::Ray;
use voxpet_core::stats::{StatSimulator, TickContext};
use voxpet_core::{Habitat, SimConfig};
use voxpet_creature::{Species, VitalStats};

#[derive(Debug, Clone)]
enum Op {
    Frame(f32),
    Feed,
    Clean,
    Play,
    Exercise,
    Sleep,
    Photo(bool),
    Grab,
    DragTo(f32, f32),
    Release,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0.0f32..200.0).prop_map(Op::Frame),
        1 => Just(Op::Feed),
        1 => Just(Op::Clean),
        1 => Just(Op::Play),
        1 => Just(Op::Exercise),
        1 => Just(Op::Sleep),
        1 => any::<bool>().prop_map(Op::Photo),
        1 => Just(Op::Grab),
        2 => (-100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, z)| Op::DragTo(x, z)),
        1 => Just(Op::Release),
    ]
}

prop_compose! {
    fn arb_stats()(
        hunger in -50.0f32..150.0,
        hygiene in -50.0f32..150.0,
        happiness in -50.0f32..150.0,
        energy in -50.0f32..150.0,
        weight in -50.0f32..150.0,
        pig in any::<bool>(),
        seed in "[a-z0-9]{1,8}",
    ) -> VitalStats {
        let species = if pig { Species::Pig } else { Species::Chicken };
        let mut stats = VitalStats::new(seed, species);
        stats.hunger = hunger;
        stats.hygiene = hygiene;
        stats.happiness = happiness;
        stats.energy = energy;
        stats.weight = weight;
        stats
    }
}

fn ray_above(x: f32, z: f32) -> Option<Ray> {
    Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
}

fn apply(habitat: &mut Habitat, op: &Op, clock: &mut f64, rng: &mut Xoshiro256StarStar) {
    match op {
        Op::Frame(dt) => {
            *clock += *dt as f64;
            habitat.frame(*clock, *dt, rng);
        }
        Op::Feed => {
            habitat.feed(rng);
        }
        Op::Clean => {
            habitat.clean(rng);
        }
        Op::Play => {
            habitat.play(rng);
        }
        Op::Exercise => {
            habitat.start_exercise();
        }
        Op::Sleep => {
            habitat.sleep();
        }
        Op::Photo(on) => {
            habitat.set_photo_mode(*on);
        }
        Op::Grab => {
            let root = habitat.root().translation;
            habitat.pointer_down(ray_above(root.x, root.z), rng);
        }
        Op::DragTo(x, z) => {
            habitat.pointer_move(ray_above(*x, *z));
        }
        Op::Release => {
            habitat.pointer_up();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_stats_stay_bounded_and_death_is_final(
        stats in arb_stats(),
        ops in prop::collection::vec(arb_op(), 1..80),
        seed in any::<u64>(),
    ) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut config = SimConfig::default();
        config.hazards.starvation_chance = 0.2;
        let mut habitat = Habitat::new(stats, config, &mut rng).expect("habitat builds");
        let mut clock = 0.0;
        let mut was_dead = false;
        let mut stage = habitat.stats().evolution_stage;

        for op in &ops {
            apply(&mut habitat, op, &mut clock, &mut rng);
            let stats = habitat.stats();
            for (name, value) in stats.bounded() {
                prop_assert!((0.0..=100.0).contains(&value), "{} out of bounds: {}", name, value);
            }
            if was_dead {
                prop_assert!(!stats.is_alive, "resurrected after {:?}", op);
            }
            was_dead |= !stats.is_alive;
            prop_assert!(stats.evolution_stage >= stage);
            stage = stats.evolution_stage;
        }
    }

    #[test]
    fn test_creature_stays_on_platform(
        ops in prop::collection::vec(arb_op(), 1..120),
        seed in any::<u64>(),
    ) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let config = SimConfig::default();
        let radius = config.play_radius;
        let mut habitat = Habitat::new(VitalStats::new("roam", Species::Chicken), config, &mut rng)
            .expect("habitat builds");
        let mut clock = 0.0;

        for op in &ops {
            apply(&mut habitat, op, &mut clock, &mut rng);
            let root = habitat.root().translation;
            prop_assert!(root.x.hypot(root.z) <= radius + 1e-3, "left the platform at {:?}", root);
            let cursor = habitat.machine().cursor();
            prop_assert!(cursor.x.hypot(cursor.z) <= radius + 1e-3);
        }
    }

    #[test]
    fn test_chase_never_leaves_platform(
        targets in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 1..20),
        seed in any::<u64>(),
    ) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let config = SimConfig::default();
        let radius = config.play_radius;
        let mut habitat = Habitat::new(VitalStats::new("chase", Species::Pig), config, &mut rng)
            .expect("habitat builds");
        prop_assert!(habitat.start_exercise());
        let mut clock = 0.0;

        for (x, z) in targets {
            habitat.pointer_move(ray_above(x, z));
            for _ in 0..30 {
                clock += 16.0;
                habitat.frame(clock, 16.0, &mut rng);
                let root = habitat.root().translation;
                prop_assert!(root.x.hypot(root.z) <= radius + 1e-3);
            }
        }
    }
}

// ============================================================================
// Evolution timing
// ============================================================================

const EPSILON: f32 = 0.01;
const STEP_MS: f32 = 16.0;

/// Frames that skip decay, so held stats stay exactly where they were set
fn frozen() -> TickContext {
    TickContext {
        dt_ms: STEP_MS,
        photo_mode: true,
        ..TickContext::default()
    }
}

fn held_at(level: f32) -> StatSimulator {
    let mut stats = VitalStats::new("evo", Species::Chicken);
    stats.hunger = level;
    stats.happiness = level;
    StatSimulator::new(stats)
}

#[test]
fn test_just_below_threshold_never_evolves() {
    let config = SimConfig::default();
    let mut sim = held_at(config.evolution.threshold - EPSILON);
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);

    let frames = (config.evolution.duration_ms * 2.0 / STEP_MS) as usize;
    for _ in 0..frames {
        assert!(!sim.tick(&frozen(), &config, &mut rng).evolved);
    }
    assert_eq!(sim.stats().evolution_stage, 0);
}

#[test]
fn test_dip_before_duration_resets_accumulator() {
    let config = SimConfig::default();
    let mut sim = held_at(config.evolution.threshold + EPSILON);
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);

    let almost = ((config.evolution.duration_ms - STEP_MS) / STEP_MS) as usize;
    for _ in 0..almost {
        assert!(!sim.tick(&frozen(), &config, &mut rng).evolved);
    }
    assert!(sim.high_stats_ms() > 0.0);

    // One ordinary frame of decay drops both stats under the threshold
    let decaying = TickContext {
        dt_ms: STEP_MS,
        ..TickContext::default()
    };
    assert!(!sim.tick(&decaying, &config, &mut rng).evolved);
    assert_eq!(sim.high_stats_ms(), 0.0);

    for _ in 0..almost * 2 {
        assert!(!sim.tick(&frozen(), &config, &mut rng).evolved);
    }
    assert_eq!(sim.stats().evolution_stage, 0);
}

#[test]
fn test_held_above_threshold_evolves_once() {
    let config = SimConfig::default();
    let mut sim = held_at(config.evolution.threshold + EPSILON);
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);

    let frames = (config.evolution.duration_ms * 2.0 / STEP_MS) as usize;
    let evolved = (0..frames)
        .filter(|_| sim.tick(&frozen(), &config, &mut rng).evolved)
        .count();
    assert_eq!(evolved, 1);
    assert_eq!(sim.stats().evolution_stage, 1);
}
