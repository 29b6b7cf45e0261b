//! Vital-stat simulation and outward notification

pub mod notifier;
pub mod simulator;

pub use notifier::StatsNotifier;
pub use simulator::{MealOutcome, StatSimulator, TickContext, TickOutcome};
