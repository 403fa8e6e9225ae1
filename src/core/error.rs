use thiserror::Error;

use crate::core::types::Difficulty;

#[derive(Error, Debug)]
pub enum EncounterError {
    #[error("Invalid difficulty '{0}': expected easy, medium, hard, or deadly")]
    InvalidDifficulty(String),

    #[error("Unknown rating: {0}")]
    UnknownRating(String),

    #[error("No XP thresholds for party level {0}")]
    UnknownLevel(u8),

    #[error("Enemy group needs a difficulty, a positive member count, or ratings")]
    InsufficientSpecification,

    #[error("Rating list has {ratings} entries but member count is {members}")]
    RatingCountMismatch { ratings: usize, members: u32 },

    #[error("Ratings classify as {derived} but {requested} was requested")]
    DifficultyMismatch {
        requested: Difficulty,
        derived: Difficulty,
    },

    #[error("Difficulty {requested} is unreachable for a party of {party_size} with the given rating pool and member count")]
    UnreachableDifficulty {
        requested: Difficulty,
        party_size: u32,
    },

    #[error("Invalid initiative order: {0}")]
    InvalidInitiative(String),

    #[error("Empty list supplied for {0}")]
    EmptySeries(&'static str),

    #[error("{stat} list has {found} entries but the group has {expected} members")]
    SeriesLengthMismatch {
        stat: &'static str,
        expected: u32,
        found: usize,
    },

    #[error("Neither side can deal damage, the encounter would never end")]
    NoDamage,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Negative armor class: {0}")]
    NegativeArmorClass(i32),

    #[error("Negative hit points: {0}")]
    NegativeHitPoints(f64),

    #[error("Negative average damage: {0}")]
    NegativeDamage(f64),

    #[error("Group has no members")]
    EmptyGroup,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl EncounterError {
    /// Errors caused by caller input rather than a broken group invariant or I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EncounterError::InvalidDifficulty(_)
                | EncounterError::UnknownRating(_)
                | EncounterError::UnknownLevel(_)
                | EncounterError::InsufficientSpecification
                | EncounterError::RatingCountMismatch { .. }
                | EncounterError::DifficultyMismatch { .. }
                | EncounterError::UnreachableDifficulty { .. }
                | EncounterError::InvalidInitiative(_)
                | EncounterError::EmptySeries(_)
                | EncounterError::SeriesLengthMismatch { .. }
                | EncounterError::NoDamage
                | EncounterError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EncounterError>;
