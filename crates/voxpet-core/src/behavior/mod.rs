//! Discrete behavior states

pub mod machine;

use serde::{Deserialize, Serialize};

pub use machine::BehaviorMachine;

/// What the creature is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Idle,
    Walk,
    Eat,
    Sleep,
    Play,
    Exercise,
    Dragged,
}

impl BehaviorState {
    pub fn name(&self) -> &'static str {
        match self {
            BehaviorState::Idle => "IDLE",
            BehaviorState::Walk => "WALK",
            BehaviorState::Eat => "EAT",
            BehaviorState::Sleep => "SLEEP",
            BehaviorState::Play => "PLAY",
            BehaviorState::Exercise => "EXERCISE",
            BehaviorState::Dragged => "DRAGGED",
        }
    }

    /// Whether the idle breathing layer runs in this state
    pub fn breathes(&self) -> bool {
        !matches!(self, BehaviorState::Sleep | BehaviorState::Dragged)
    }
}

impl std::fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
