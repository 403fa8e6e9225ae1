//! Batch configuration loaded from TOML
//!
//! Every key is optional. Missing party values fall back to a standard
//! five-member level 1 party; missing enemy values are derived from ratings.
//!
//! ```toml
//! difficulty = "medium"
//! simulations = 500
//! seed = 7
//!
//! [party]
//! size = 4
//! hit_points = [10, 8, 9, 7]
//!
//! [enemies]
//! rating_pool = ["1/4", "1/2"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::combat::constants::{
    DEFAULT_ARMOR_CLASS, DEFAULT_PARTY_DAMAGE, DEFAULT_PARTY_EXTRAS, DEFAULT_PARTY_SIZE,
    DEFAULT_PARTY_TO_HIT, DEFAULT_PC_HIT_POINTS, PARTY_LEVEL,
};
use crate::combat::enemies::RatingInput;
use crate::combat::groups::StatInput;
use crate::core::error::{EncounterError, Result};
use crate::core::types::Difficulty;
use crate::rules::tables::Rating;

/// Number of simulations when none is configured
pub const DEFAULT_SIMULATIONS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartyConfig {
    pub size: u32,
    /// Only level 1 is simulated; other values are forced back to 1
    pub level: u8,
    pub extras: u32,
    pub armor_class: StatInput,
    pub to_hit: StatInput,
    /// Per member: one value for every member, or a list with one entry each
    pub hit_points: StatInput,
    pub average_damage: f64,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_PARTY_SIZE,
            level: PARTY_LEVEL,
            extras: DEFAULT_PARTY_EXTRAS,
            armor_class: StatInput::Scalar(DEFAULT_ARMOR_CLASS),
            to_hit: StatInput::Scalar(DEFAULT_PARTY_TO_HIT),
            hit_points: StatInput::Scalar(DEFAULT_PC_HIT_POINTS),
            average_damage: DEFAULT_PARTY_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    pub count: Option<u32>,
    pub armor_class: StatInput,
    /// Derived from the ratings when absent
    pub to_hit: Option<StatInput>,
    /// Per member; derived from the ratings when absent
    pub hit_points: Option<StatInput>,
    /// Derived from the ratings when absent
    pub average_damage: Option<f64>,
    pub ratings: Option<RatingInput>,
    /// Ratings the randomized builder may draw from (all when absent)
    pub rating_pool: Option<Vec<Rating>>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: None,
            armor_class: StatInput::Scalar(DEFAULT_ARMOR_CLASS),
            to_hit: None,
            hit_points: None,
            average_damage: None,
            ratings: None,
            rating_pool: None,
        }
    }
}

impl EnemyConfig {
    /// Member count when it is fixed by the configuration alone
    pub fn fixed_count(&self) -> Option<u32> {
        match (&self.ratings, self.count) {
            (Some(RatingInput::List(list)), _) => Some(list.len() as u32),
            (_, count) => count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub difficulty: Option<Difficulty>,
    pub simulations: usize,
    /// Base seed; run `i` uses `seed + i`
    pub seed: Option<u64>,
    /// Fixed turn order, 1 for a PC and 0 for an enemy
    pub initiative: Option<Vec<u8>>,
    pub party: PartyConfig,
    pub enemies: EnemyConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            difficulty: None,
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
            initiative: None,
            party: PartyConfig::default(),
            enemies: EnemyConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file without validating it
    ///
    /// Callers may still override values; `run_batch` validates the result.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Check the parts of the configuration that no constructor sees
    pub fn validate(&self) -> Result<()> {
        if self.simulations == 0 {
            return Err(EncounterError::InvalidConfig(
                "simulations must be at least 1".into(),
            ));
        }

        if self.difficulty.is_none()
            && self.enemies.ratings.is_none()
            && !matches!(self.enemies.count, Some(n) if n > 0)
        {
            return Err(EncounterError::InsufficientSpecification);
        }

        if let Some(initiative) = &self.initiative {
            let Some(enemy_count) = self.enemies.fixed_count() else {
                return Err(EncounterError::InvalidConfig(
                    "a fixed initiative order needs a fixed enemy count".into(),
                ));
            };
            let expected = self
                .party
                .size
                .checked_add(enemy_count)
                .ok_or_else(|| {
                    EncounterError::InvalidConfig(format!(
                        "party size {} plus {} enemies is too many combatants",
                        self.party.size, enemy_count
                    ))
                })? as usize;
            if initiative.len() != expected {
                return Err(EncounterError::InvalidInitiative(format!(
                    "expected {} entries, found {}",
                    expected,
                    initiative.len()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_needs_enemy_details() {
        assert!(matches!(
            BatchConfig::from_toml_str(""),
            Err(EncounterError::InsufficientSpecification)
        ));
    }

    #[test]
    fn test_parse_full_config() {
        let config = BatchConfig::from_toml_str(
            r#"
            difficulty = "Hard"
            simulations = 50
            seed = 9

            [party]
            size = 4
            to_hit = [5, 4, 6, 5]
            hit_points = [10, 8, 9, 7]

            [enemies]
            rating_pool = ["1/4", "1/2"]
            "#,
        )
        .unwrap();

        assert_eq!(config.difficulty, Some(Difficulty::Hard));
        assert_eq!(config.simulations, 50);
        assert_eq!(config.party.size, 4);
        assert_eq!(config.party.extras, DEFAULT_PARTY_EXTRAS);
        assert_eq!(
            config.party.hit_points,
            StatInput::Series(vec![10.0, 8.0, 9.0, 7.0])
        );
        assert_eq!(
            config.enemies.rating_pool,
            Some(vec![Rating::Quarter, Rating::Half])
        );
    }

    #[test]
    fn test_single_rating_token() {
        let config = BatchConfig::from_toml_str(
            r#"
            [enemies]
            count = 3
            ratings = "1/8"
            "#,
        )
        .unwrap();
        assert_eq!(config.enemies.ratings, Some(RatingInput::Single(Rating::Eighth)));
        assert_eq!(config.enemies.fixed_count(), Some(3));
    }

    #[test]
    fn test_bad_tokens_rejected() {
        assert!(BatchConfig::from_toml_str("difficulty = \"trivial\"").is_err());
        assert!(BatchConfig::from_toml_str("[enemies]\nratings = [\"1/3\"]").is_err());
        assert!(BatchConfig::from_toml_str("difficulty = \"easy\"\nbogus = 1").is_err());
    }

    #[test]
    fn test_initiative_length_checked() {
        let err = BatchConfig::from_toml_str(
            r#"
            initiative = [1, 0, 1]
            [party]
            size = 2
            [enemies]
            ratings = ["1/4", "1/4"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EncounterError::InvalidInitiative(_)));
    }

    #[test]
    fn test_combatant_count_overflow_rejected() {
        let err = BatchConfig::from_toml_str(
            r#"
            initiative = [1, 0]
            [party]
            size = 4294967295
            [enemies]
            count = 1
            ratings = "1/4"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EncounterError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_simulations_rejected() {
        assert!(matches!(
            BatchConfig::from_toml_str("difficulty = \"easy\"\nsimulations = 0"),
            Err(EncounterError::InvalidConfig(_))
        ));
    }
}
