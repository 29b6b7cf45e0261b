//! Simulation tuning
//!
//! Every rate is per millisecond of frame time unless noted. Defaults
//! reproduce the classic feel at 60 fps.

use serde::{Deserialize, Serialize};

/// Nominal frame length used to convert per-tick chances into rates
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

/// How stochastic hazards (starvation, waste) scale with frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardTiming {
    /// One roll per tick at the configured chance; effective rate follows
    /// the frame rate
    #[default]
    PerTick,
    /// Chance scaled by `dt / REFERENCE_FRAME_MS`, so the rate per second is
    /// independent of the frame rate
    PerSecond,
}

impl HazardTiming {
    /// Chance to roll this tick for a per-tick base chance
    pub fn chance(&self, base: f32, dt_ms: f32) -> f32 {
        match self {
            HazardTiming::PerTick => base,
            HazardTiming::PerSecond => (base * dt_ms / REFERENCE_FRAME_MS).clamp(0.0, 1.0),
        }
    }
}

/// Stat decay and recovery rates, multiplied by `stat_decay_rate * dt`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayRates {
    pub stat_decay_rate: f32,
    pub hunger: f32,
    pub hygiene: f32,
    pub happiness: f32,
    pub energy: f32,
    pub sleep_energy_gain: f32,
    pub sleep_hunger: f32,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            stat_decay_rate: 0.05,
            hunger: 0.015,
            hygiene: 0.01,
            happiness: 0.02,
            energy: 0.01,
            sleep_energy_gain: 0.2,
            sleep_hunger: 0.005,
        }
    }
}

/// Starvation and waste hazards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Hazards {
    pub timing: HazardTiming,
    pub starvation_chance: f32,
    pub waste_chance: f32,
    /// Waste only appears while hygiene is below this
    pub waste_hygiene_threshold: f32,
    /// Extra hygiene lost per tick while any waste is on the platform
    pub waste_hygiene_drain: f32,
    /// Distance behind the creature where waste lands
    pub waste_offset: f32,
}

impl Default for Hazards {
    fn default() -> Self {
        Self {
            timing: HazardTiming::PerTick,
            starvation_chance: 0.001,
            waste_chance: 0.001,
            waste_hygiene_threshold: 60.0,
            waste_hygiene_drain: 0.05,
            waste_offset: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionRules {
    /// Happiness and hunger must both stay strictly above this
    pub threshold: f32,
    /// How long they must hold, in ms
    pub duration_ms: f32,
}

impl Default for EvolutionRules {
    fn default() -> Self {
        Self {
            threshold: 90.0,
            duration_ms: 60_000.0,
        }
    }
}

/// Locomotion speeds (units per ms) and steering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Movement {
    pub walk_speed: f32,
    pub chase_speed: f32,
    pub walk_turn: f32,
    pub chase_turn: f32,
    pub arrival_distance: f32,
    pub chase_arrival_distance: f32,
    pub wander_radius: f32,
    pub wander_chance: f32,
    pub idle_turn_chance: f32,
    /// Height the creature is lifted to while dragged
    pub drag_height: f32,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            walk_speed: 0.004,
            chase_speed: 0.01,
            walk_turn: 0.1,
            chase_turn: 0.2,
            arrival_distance: 0.8,
            chase_arrival_distance: 0.5,
            wander_radius: 8.0,
            wander_chance: 0.005,
            idle_turn_chance: 0.01,
            drag_height: 2.5,
        }
    }
}

/// Action durations and stat effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRules {
    pub eat_duration_ms: f32,
    pub play_duration_ms: f32,
    /// A meal eaten above this hunger turns into weight
    pub overeat_threshold: f32,
    pub overeat_weight_gain: f32,
    pub overeat_happiness_penalty: f32,
    pub meal_hunger_restore: f32,
    /// Below this weight a normal meal also adds a little weight
    pub underweight_below: f32,
    pub meal_weight_gain: f32,
    pub play_happiness: f32,
    pub play_energy_cost: f32,
    pub exercise_min_energy: f32,
    pub exercise_stop_energy: f32,
    pub exercise_weight_burn: f32,
    pub exercise_energy_burn: f32,
    pub exercise_hygiene_burn: f32,
    pub exercise_min_weight: f32,
    pub sweat_chance: f32,
}

impl Default for ActionRules {
    fn default() -> Self {
        Self {
            eat_duration_ms: 2000.0,
            play_duration_ms: 1500.0,
            overeat_threshold: 90.0,
            overeat_weight_gain: 10.0,
            overeat_happiness_penalty: 5.0,
            meal_hunger_restore: 30.0,
            underweight_below: 50.0,
            meal_weight_gain: 2.0,
            play_happiness: 15.0,
            play_energy_cost: 5.0,
            exercise_min_energy: 10.0,
            exercise_stop_energy: 5.0,
            exercise_weight_burn: 0.01,
            exercise_energy_burn: 0.02,
            exercise_hygiene_burn: 0.005,
            exercise_min_weight: 10.0,
            sweat_chance: 0.1,
        }
    }
}

/// Falling food tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodRules {
    pub min_radius: f32,
    pub max_radius: f32,
    pub drop_height: f32,
    pub rest_height: f32,
    pub fall_speed: f32,
}

impl Default for FoodRules {
    fn default() -> Self {
        Self {
            min_radius: 3.0,
            max_radius: 6.0,
            drop_height: 6.0,
            rest_height: 0.1,
            fall_speed: 0.01,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub decay: DecayRates,
    pub hazards: Hazards,
    pub evolution: EvolutionRules,
    pub movement: Movement,
    pub actions: ActionRules,
    pub food: FoodRules,
    /// Radius the creature, drag and chase targets are confined to
    pub play_radius: f32,
    /// Radius of the visible platform
    pub platform_radius: f32,
    /// Minimum spacing between outward stats snapshots
    pub notify_interval_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            decay: DecayRates::default(),
            hazards: Hazards::default(),
            evolution: EvolutionRules::default(),
            movement: Movement::default(),
            actions: ActionRules::default(),
            food: FoodRules::default(),
            play_radius: 13.0,
            platform_radius: 15.0,
            notify_interval_ms: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.play_radius, 13.0);
        assert_eq!(config.decay.stat_decay_rate, 0.05);
        assert_eq!(config.hazards.timing, HazardTiming::PerTick);
        assert_eq!(config.actions.eat_duration_ms, 2000.0);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config: SimConfig =
            ron::from_str("(play_radius: 10.0, hazards: (timing: per_second))").expect("valid RON");
        assert_eq!(config.play_radius, 10.0);
        assert_eq!(config.hazards.timing, HazardTiming::PerSecond);
        assert_eq!(config.hazards.starvation_chance, 0.001);
        assert_eq!(config.movement.drag_height, 2.5);
    }

    #[test]
    fn test_hazard_timing_scaling() {
        assert_eq!(HazardTiming::PerTick.chance(0.001, 100.0), 0.001);
        let scaled = HazardTiming::PerSecond.chance(0.001, REFERENCE_FRAME_MS * 2.0);
        assert!((scaled - 0.002).abs() < 1e-6);
        assert_eq!(HazardTiming::PerSecond.chance(0.5, 1000.0), 1.0);
    }
}
