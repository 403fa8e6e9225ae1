//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EncounterError;

/// Which side a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Pc,
    Enemy,
}

impl Side {
    /// Parse an initiative marker: 1 is a PC turn, 0 an enemy turn
    pub fn from_marker(marker: u8) -> Result<Self, EncounterError> {
        match marker {
            1 => Ok(Side::Pc),
            0 => Ok(Side::Enemy),
            other => Err(EncounterError::InvalidInitiative(format!(
                "entries must be 0 or 1, found {}",
                other
            ))),
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Side::Pc => Side::Enemy,
            Side::Enemy => Side::Pc,
        }
    }
}

/// Encounter difficulty category, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl Difficulty {
    /// All categories in severity order
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Deadly,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Deadly => "deadly",
        }
    }

    /// Next more severe category, if any
    pub fn harder(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => Some(Difficulty::Deadly),
            Difficulty::Deadly => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = EncounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "deadly" => Ok(Difficulty::Deadly),
            _ => Err(EncounterError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = EncounterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

/// Character levels of a party
///
/// Thresholds for a uniform party scale with its size; a mixed party sums
/// the per-member threshold of each listed level instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyLevels {
    Uniform(u8),
    Mixed(Vec<u8>),
}

impl Default for PartyLevels {
    fn default() -> Self {
        PartyLevels::Uniform(1)
    }
}
