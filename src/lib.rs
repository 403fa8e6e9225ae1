//! Encounter Calibration - difficulty budgets and turn-based combat simulation

pub mod combat;
pub mod core;
pub mod rules;
pub mod simulation;
