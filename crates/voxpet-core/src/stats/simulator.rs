//! Vital-stat simulation
//!
//! The simulator is the only writer of `VitalStats`. Every mutation goes
//! through it and ends with a clamp, so bounded stats never leave
//! `[0, 100]`, death never reverses and evolution never goes back.

use voxpet_creature::VitalStats;
use voxpet_creature::types::STAT_MAX;

use crate::config::SimConfig;
use crate::rng_trait::SimRng;

/// Frame conditions that gate the decay branch
#[derive(Debug, Clone, Copy, Default)]
pub struct TickContext {
    pub dt_ms: f32,
    pub dragging: bool,
    pub photo_mode: bool,
    pub waste_present: bool,
}

/// Discrete events produced by one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub died: bool,
    pub spawn_waste: bool,
    pub evolved: bool,
}

/// Which branch a finished meal took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealOutcome {
    /// Already full: weight gain and a happiness penalty
    Overeat,
    /// Hunger restored, plus a little weight if underweight
    Nourish,
}

#[derive(Debug, Clone)]
pub struct StatSimulator {
    stats: VitalStats,
    /// Time both evolution stats have held above threshold
    high_stats_ms: f32,
}

impl StatSimulator {
    pub fn new(mut stats: VitalStats) -> Self {
        stats.clamp();
        Self {
            stats,
            high_stats_ms: 0.0,
        }
    }

    pub fn stats(&self) -> &VitalStats {
        &self.stats
    }

    pub fn high_stats_ms(&self) -> f32 {
        self.high_stats_ms
    }

    /// Replace the record wholesale (load)
    pub fn adopt(&mut self, stats: VitalStats) {
        *self = Self::new(stats);
    }

    /// Mutable access for generation (species fallback and default name)
    pub fn identity_mut(&mut self) -> &mut VitalStats {
        &mut self.stats
    }

    fn mutate(&mut self, f: impl FnOnce(&mut VitalStats)) {
        let was_alive = self.stats.is_alive;
        let stage = self.stats.evolution_stage;
        f(&mut self.stats);
        self.stats.is_alive &= was_alive;
        self.stats.evolution_stage = self.stats.evolution_stage.max(stage);
        self.stats.clamp();
    }

    /// Advance the record by one frame
    pub fn tick<R: SimRng + ?Sized>(
        &mut self,
        ctx: &TickContext,
        config: &SimConfig,
        rng: &mut R,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.stats.is_alive {
            return outcome;
        }

        let dt = ctx.dt_ms.max(0.0);
        let rates = &config.decay;
        let scale = rates.stat_decay_rate * dt;
        let hazards = &config.hazards;

        if !ctx.dragging && !ctx.photo_mode {
            if self.stats.is_sleeping {
                self.mutate(|s| {
                    s.energy += scale * rates.sleep_energy_gain;
                    s.hunger -= scale * rates.sleep_hunger;
                });
            } else {
                self.mutate(|s| {
                    s.hunger -= scale * rates.hunger;
                    s.hygiene -= scale * rates.hygiene;
                    s.happiness -= scale * rates.happiness;
                    s.energy -= scale * rates.energy;
                });

                if self.stats.hunger <= 0.0
                    && rng.check_probability(hazards.timing.chance(hazards.starvation_chance, dt))
                {
                    self.stats.is_alive = false;
                    outcome.died = true;
                    log::warn!("{} starved", self.stats.name);
                }

                if self.stats.hygiene < hazards.waste_hygiene_threshold
                    && rng.check_probability(hazards.timing.chance(hazards.waste_chance, dt))
                {
                    outcome.spawn_waste = true;
                }
                if ctx.waste_present || outcome.spawn_waste {
                    self.mutate(|s| s.hygiene -= hazards.waste_hygiene_drain);
                }
            }
        }

        outcome.evolved = self.track_evolution(dt, config);
        outcome
    }

    fn track_evolution(&mut self, dt: f32, config: &SimConfig) -> bool {
        let rules = &config.evolution;
        let holding = self.stats.evolution_stage == 0
            && self.stats.happiness > rules.threshold
            && self.stats.hunger > rules.threshold;
        if !holding {
            self.high_stats_ms = 0.0;
            return false;
        }

        self.high_stats_ms += dt;
        if self.high_stats_ms > rules.duration_ms {
            self.high_stats_ms = 0.0;
            self.mutate(|s| s.evolution_stage = 1);
            log::info!("{} evolved", self.stats.name);
            return true;
        }
        false
    }

    /// Apply a finished meal; hunger is read now, not when the food dropped
    pub fn eat_meal(&mut self, config: &SimConfig) -> MealOutcome {
        let rules = &config.actions;
        let outcome = if self.stats.hunger > rules.overeat_threshold {
            MealOutcome::Overeat
        } else {
            MealOutcome::Nourish
        };
        self.mutate(|s| match outcome {
            MealOutcome::Overeat => {
                s.weight += rules.overeat_weight_gain;
                s.happiness -= rules.overeat_happiness_penalty;
            }
            MealOutcome::Nourish => {
                s.hunger += rules.meal_hunger_restore;
                if s.weight < rules.underweight_below {
                    s.weight += rules.meal_weight_gain;
                }
            }
        });
        log::debug!("{} finished a meal: {:?}", self.stats.name, outcome);
        outcome
    }

    pub fn play(&mut self, config: &SimConfig) {
        let rules = &config.actions;
        self.mutate(|s| {
            s.happiness += rules.play_happiness;
            s.energy -= rules.play_energy_cost;
        });
    }

    /// Calories and hygiene burned by a frame of chasing
    pub fn burn_exercise(&mut self, dt_ms: f32, config: &SimConfig) {
        let rules = &config.actions;
        let dt = dt_ms.max(0.0);
        self.mutate(|s| {
            s.weight = (s.weight - rules.exercise_weight_burn * dt).max(rules.exercise_min_weight);
            s.energy -= rules.exercise_energy_burn * dt;
            s.hygiene -= rules.exercise_hygiene_burn * dt;
        });
    }

    pub fn restore_hygiene(&mut self) {
        self.mutate(|s| s.hygiene = STAT_MAX);
    }

    /// Flip the sleeping flag, returning the new value
    pub fn toggle_sleep(&mut self) -> bool {
        self.mutate(|s| s.is_sleeping = !s.is_sleeping);
        self.stats.is_sleeping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use voxpet_creature::Species;

    /// RNG that always rolls the same value
    struct Stuck(f32);

    impl SimRng for Stuck {
        fn gen_f32(&mut self) -> f32 {
            self.0
        }
    }

    fn fresh() -> StatSimulator {
        StatSimulator::new(VitalStats::new("tick", Species::Chicken))
    }

    fn awake(dt_ms: f32) -> TickContext {
        TickContext {
            dt_ms,
            ..TickContext::default()
        }
    }

    #[test]
    fn test_awake_decay() {
        let config = SimConfig::default();
        let mut sim = fresh();
        sim.tick(&awake(1000.0), &config, &mut Stuck(0.99));
        let s = sim.stats();
        // 0.05 * 0.015 * 1000 = 0.75
        assert!((s.hunger - 79.25).abs() < 1e-4);
        assert!((s.hygiene - 99.5).abs() < 1e-4);
        assert!((s.happiness - 79.0).abs() < 1e-4);
        assert!((s.energy - 99.5).abs() < 1e-4);
    }

    #[test]
    fn test_sleep_rates() {
        let config = SimConfig::default();
        let mut stats = VitalStats::new("sleep", Species::Pig);
        stats.energy = 50.0;
        stats.is_sleeping = true;
        let mut sim = StatSimulator::new(stats);
        sim.tick(&awake(100.0), &config, &mut Stuck(0.0));
        assert!((sim.stats().energy - 51.0).abs() < 1e-4);
        assert!((sim.stats().hunger - 79.975).abs() < 1e-4);
        assert_eq!(sim.stats().hygiene, 100.0);
        assert!(sim.stats().is_alive);
    }

    #[test]
    fn test_drag_and_photo_suppress_decay() {
        let config = SimConfig::default();
        for ctx in [
            TickContext { dt_ms: 1000.0, dragging: true, ..TickContext::default() },
            TickContext { dt_ms: 1000.0, photo_mode: true, ..TickContext::default() },
        ] {
            let mut sim = fresh();
            let before = sim.stats().clone();
            sim.tick(&ctx, &config, &mut Stuck(0.0));
            assert_eq!(sim.stats(), &before);
        }
    }

    #[test]
    fn test_starvation_is_permanent() {
        let config = SimConfig::default();
        let mut stats = VitalStats::new("starve", Species::Chicken);
        stats.hunger = 0.0;
        let mut sim = StatSimulator::new(stats);

        let outcome = sim.tick(&awake(16.0), &config, &mut Stuck(0.0));
        assert!(outcome.died);
        assert!(!sim.stats().is_alive);

        sim.play(&config);
        sim.eat_meal(&config);
        sim.toggle_sleep();
        let after = sim.tick(&awake(16.0), &config, &mut Stuck(0.0));
        assert_eq!(after, TickOutcome::default());
        assert!(!sim.stats().is_alive);
    }

    #[test]
    fn test_no_starvation_with_food_in_belly() {
        let config = SimConfig::default();
        let mut sim = fresh();
        let outcome = sim.tick(&awake(16.0), &config, &mut Stuck(0.0));
        assert!(!outcome.died);
    }

    #[test]
    fn test_waste_spawn_and_drain() {
        let config = SimConfig::default();
        let mut stats = VitalStats::new("mess", Species::Chicken);
        stats.hygiene = 50.0;
        let mut sim = StatSimulator::new(stats);

        let outcome = sim.tick(&awake(0.0), &config, &mut Stuck(0.0));
        assert!(outcome.spawn_waste);
        assert!((sim.stats().hygiene - 49.95).abs() < 1e-4);

        let quiet = sim.tick(
            &TickContext { waste_present: true, ..TickContext::default() },
            &config,
            &mut Stuck(0.5),
        );
        assert!(!quiet.spawn_waste);
        assert!((sim.stats().hygiene - 49.90).abs() < 1e-4);
    }

    #[test]
    fn test_meal_branches_are_exclusive() {
        let config = SimConfig::default();

        let mut full = fresh();
        full.identity_mut().hunger = 95.0;
        assert_eq!(full.eat_meal(&config), MealOutcome::Overeat);
        assert_eq!(full.stats().hunger, 95.0);
        assert_eq!(full.stats().weight, 60.0);
        assert_eq!(full.stats().happiness, 75.0);

        let mut hungry = fresh();
        hungry.identity_mut().hunger = 40.0;
        hungry.identity_mut().weight = 45.0;
        assert_eq!(hungry.eat_meal(&config), MealOutcome::Nourish);
        assert_eq!(hungry.stats().hunger, 70.0);
        assert_eq!(hungry.stats().weight, 47.0);
        assert_eq!(hungry.stats().happiness, 80.0);
    }

    #[test]
    fn test_play_and_exercise_effects() {
        let config = SimConfig::default();
        let mut sim = fresh();
        sim.play(&config);
        assert_eq!(sim.stats().happiness, 95.0);
        assert_eq!(sim.stats().energy, 95.0);
        sim.play(&config);
        assert_eq!(sim.stats().happiness, 100.0);

        sim.identity_mut().weight = 10.5;
        sim.burn_exercise(100.0, &config);
        assert_eq!(sim.stats().weight, 10.0);
        assert!((sim.stats().energy - 88.0).abs() < 1e-4);
        assert!((sim.stats().hygiene - 99.5).abs() < 1e-4);
    }

    #[test]
    fn test_evolution_requires_continuous_hold() {
        let mut config = SimConfig::default();
        config.evolution.duration_ms = 1000.0;
        config.decay.stat_decay_rate = 0.0;

        let mut stats = VitalStats::new("evolve", Species::Chicken);
        stats.happiness = 95.0;
        stats.hunger = 95.0;
        let mut sim = StatSimulator::new(stats);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);

        for _ in 0..9 {
            assert!(!sim.tick(&awake(100.0), &config, &mut rng).evolved);
        }
        sim.identity_mut().happiness = 80.0;
        sim.tick(&awake(100.0), &config, &mut rng);
        assert_eq!(sim.high_stats_ms(), 0.0);

        sim.identity_mut().happiness = 95.0;
        let mut evolved = false;
        for _ in 0..11 {
            evolved |= sim.tick(&awake(100.0), &config, &mut rng).evolved;
        }
        assert!(evolved);
        assert_eq!(sim.stats().evolution_stage, 1);
    }

    #[test]
    fn test_adopt_clamps_input() {
        let mut stats = VitalStats::new("load", Species::Pig);
        stats.hunger = 250.0;
        stats.energy = f32::NAN;
        let sim = StatSimulator::new(stats);
        assert_eq!(sim.stats().hunger, 100.0);
        assert_eq!(sim.stats().energy, 0.0);
    }
}
