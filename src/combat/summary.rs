//! Encounter outcome record
//!
//! Flat by design so a batch can write one CSV row per encounter.

use serde::{Deserialize, Serialize};

use crate::core::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub party_hp: f64,
    pub party_extras: u32,
    pub frac_party_hp: f64,
    pub frac_party_extras: f64,
    pub num_party_down: u32,
    pub frac_party_down: f64,
    /// Party still has hit points left
    pub success: bool,
    pub enemies_hp: f64,
    pub frac_enemies_hp: f64,
    pub num_enemies_down: u32,
    pub num_enemies: u32,
    pub frac_enemies_down: f64,
    pub ratings: String,
    pub difficulty: Difficulty,
    pub total_xp: f64,
    /// Rounds started, a partial final round counts as one
    pub num_rounds: u32,
    /// Turns taken by combatants that were not down
    pub num_turns: u32,
    pub seed: u64,
}

impl EncounterSummary {
    pub const CSV_HEADER: &'static str = "party_hp,party_extras,frac_party_hp,frac_party_extras,\
num_party_down,frac_party_down,success,enemies_hp,frac_enemies_hp,num_enemies_down,num_enemies,\
frac_enemies_down,ratings,difficulty,total_xp,num_rounds,num_turns,seed";

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.party_hp,
            self.party_extras,
            self.frac_party_hp,
            self.frac_party_extras,
            self.num_party_down,
            self.frac_party_down,
            self.success,
            self.enemies_hp,
            self.frac_enemies_hp,
            self.num_enemies_down,
            self.num_enemies,
            self.frac_enemies_down,
            self.ratings,
            self.difficulty,
            self.total_xp,
            self.num_rounds,
            self.num_turns,
            self.seed,
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string())
    }
}
