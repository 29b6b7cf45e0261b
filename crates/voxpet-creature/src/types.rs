//! Common types shared between the generator, the simulation and the app
//!
//! `VitalStats` is the record every surrounding layer reads; only the stat
//! simulator in voxpet-core mutates it.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for transient entities (food, waste, meshes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Generate a new unique entity ID
    pub fn new() -> Self {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value (useful for debugging)
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Creature species
///
/// Unknown names in saved data deserialize to `Unsupported`; the generator
/// coerces those to `Chicken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[default]
    Chicken,
    Pig,
    #[serde(other)]
    Unsupported,
}

impl Species {
    /// Species a new creature can be created as
    pub fn all() -> &'static [Species] {
        &[Species::Chicken, Species::Pig]
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Species::Chicken => "chicken",
            Species::Pig => "pig",
            Species::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chicken" | "hen" => Ok(Species::Chicken),
            "pig" | "piglet" => Ok(Species::Pig),
            _ => Err(format!("Unknown species: {}. Valid: chicken, pig", s)),
        }
    }
}

/// Names the generator is allowed to replace with a palette-derived one
pub const PLACEHOLDER_NAMES: &[&str] = &["Loading...", "...", "", "Voxel"];

/// Upper bound of every bounded stat
pub const STAT_MAX: f32 = 100.0;

fn default_weight() -> f32 {
    50.0
}

/// The creature's vital-stat record
///
/// Bounded stats live in `[0, 100]`. `weight` and `species` carry serde
/// defaults so documents written before those fields existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalStats {
    pub hunger: f32,
    pub hygiene: f32,
    pub happiness: f32,
    pub energy: f32,
    #[serde(default = "default_weight")]
    pub weight: f32,
    pub is_sleeping: bool,
    pub is_alive: bool,
    pub evolution_stage: u8,
    pub seed: String,
    pub name: String,
    #[serde(default)]
    pub species: Species,
}

impl VitalStats {
    /// Fresh stats for a newborn creature
    pub fn new(seed: impl Into<String>, species: Species) -> Self {
        Self {
            hunger: 80.0,
            hygiene: 100.0,
            happiness: 80.0,
            energy: 100.0,
            weight: default_weight(),
            is_sleeping: false,
            is_alive: true,
            evolution_stage: 0,
            seed: seed.into(),
            name: PLACEHOLDER_NAMES[0].to_string(),
            species,
        }
    }

    /// Whether `name` is still a placeholder the generator may overwrite
    pub fn has_placeholder_name(&self) -> bool {
        PLACEHOLDER_NAMES.contains(&self.name.as_str())
    }

    /// Clamp every bounded stat back into `[0, 100]`
    ///
    /// Non-finite values (from a corrupted document) collapse to 0.
    pub fn clamp(&mut self) {
        for stat in [
            &mut self.hunger,
            &mut self.hygiene,
            &mut self.happiness,
            &mut self.energy,
            &mut self.weight,
        ] {
            *stat = if stat.is_finite() {
                stat.clamp(0.0, STAT_MAX)
            } else {
                0.0
            };
        }
        self.evolution_stage = self.evolution_stage.min(1);
    }

    /// Iterate bounded stats by name (for logging and assertions)
    pub fn bounded(&self) -> [(&'static str, f32); 5] {
        [
            ("hunger", self.hunger),
            ("hygiene", self.hygiene),
            ("happiness", self.happiness),
            ("energy", self.energy),
            ("weight", self.weight),
        ]
    }
}

impl Default for VitalStats {
    fn default() -> Self {
        Self::new("voxel", Species::Chicken)
    }
}
