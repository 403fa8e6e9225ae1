//! Static rating and threshold tables
//!
//! Every rating token keys one row of enemy statistics. Thresholds are
//! per-member XP values; a party's boundary is the sum over its members.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EncounterError;
use crate::core::types::Difficulty;

/// Enemy power rating, ordered by strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rating {
    Zero,
    Eighth,
    Quarter,
    Half,
    One,
    Two,
    Three,
}

/// Average statistics of an enemy at a given rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub xp: u32,
    pub hit_points: f64,
    pub damage: f64,
    pub to_hit: i32,
}

impl Rating {
    /// All ratings, weakest first
    pub fn all() -> &'static [Rating] {
        &[
            Rating::Zero,
            Rating::Eighth,
            Rating::Quarter,
            Rating::Half,
            Rating::One,
            Rating::Two,
            Rating::Three,
        ]
    }

    pub fn token(self) -> &'static str {
        match self {
            Rating::Zero => "0",
            Rating::Eighth => "1/8",
            Rating::Quarter => "1/4",
            Rating::Half => "1/2",
            Rating::One => "1",
            Rating::Two => "2",
            Rating::Three => "3",
        }
    }

    /// Numeric value of the token ("1/4" is 0.25)
    pub fn value(self) -> f64 {
        match self {
            Rating::Zero => 0.0,
            Rating::Eighth => 0.125,
            Rating::Quarter => 0.25,
            Rating::Half => 0.5,
            Rating::One => 1.0,
            Rating::Two => 2.0,
            Rating::Three => 3.0,
        }
    }

    pub fn stats(self) -> RatingStats {
        match self {
            Rating::Zero => RatingStats { xp: 10, hit_points: 3.0, damage: 1.5, to_hit: 2 },
            Rating::Eighth => RatingStats { xp: 25, hit_points: 9.0, damage: 3.5, to_hit: 3 },
            Rating::Quarter => RatingStats { xp: 50, hit_points: 13.0, damage: 5.0, to_hit: 4 },
            Rating::Half => RatingStats { xp: 100, hit_points: 22.0, damage: 6.5, to_hit: 4 },
            Rating::One => RatingStats { xp: 200, hit_points: 33.0, damage: 9.0, to_hit: 4 },
            Rating::Two => RatingStats { xp: 450, hit_points: 52.0, damage: 13.5, to_hit: 5 },
            Rating::Three => RatingStats { xp: 700, hit_points: 70.0, damage: 17.5, to_hit: 5 },
        }
    }

    pub fn xp(self) -> u32 {
        self.stats().xp
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.token())
    }
}

impl FromStr for Rating {
    type Err = EncounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Rating::all()
            .iter()
            .copied()
            .find(|r| r.token() == token)
            .ok_or_else(|| EncounterError::UnknownRating(s.to_string()))
    }
}

impl TryFrom<String> for Rating {
    type Error = EncounterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rating> for String {
    fn from(value: Rating) -> Self {
        value.token().to_string()
    }
}

/// Per-member XP threshold for a character level and difficulty
pub fn xp_threshold(level: u8, difficulty: Difficulty) -> Result<u32, EncounterError> {
    let row: [u32; 4] = match level {
        1 => [25, 50, 75, 100],
        2 => [50, 100, 150, 200],
        3 => [75, 150, 225, 400],
        4 => [125, 250, 375, 500],
        5 => [250, 500, 750, 1100],
        other => return Err(EncounterError::UnknownLevel(other)),
    };
    let idx = match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
        Difficulty::Deadly => 3,
    };
    Ok(row[idx])
}

/// Join ratings into a single token string ("1/4_1/4_1")
pub fn describe_ratings(ratings: &[Rating]) -> String {
    ratings
        .iter()
        .map(|r| r.token())
        .collect::<Vec<_>>()
        .join("_")
}
