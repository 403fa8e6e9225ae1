//! Enemy groups
//!
//! A group is either fully specified by its ratings or built at random to
//! match a difficulty. Stats not given explicitly come from the ratings.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::builder::{Roster, RosterBuilder};
use crate::combat::groups::GroupStats;
use crate::core::config::EnemyConfig;
use crate::core::error::{EncounterError, Result};
use crate::core::types::{Difficulty, PartyLevels};
use crate::rules::difficulty::calculate_difficulty;
use crate::rules::tables::{describe_ratings, Rating};

/// Ratings as supplied: one token for every member, or one per member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Single(Rating),
    List(Vec<Rating>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyGroup {
    pub(crate) stats: GroupStats,
    difficulty: Difficulty,
    ratings: Vec<Rating>,
    total_xp: f64,
    target_party_size: u32,
    target_party_levels: PartyLevels,
    starting_hit_points: f64,
}

impl EnemyGroup {
    /// Build a group for a party of `party_size`
    ///
    /// `rng` is only drawn from when the roster has to be generated.
    pub fn from_config<R: Rng + ?Sized>(
        config: &EnemyConfig,
        difficulty: Option<Difficulty>,
        party_size: u32,
        party_levels: &PartyLevels,
        rng: &mut R,
    ) -> Result<Self> {
        let positive_count = config.count.filter(|n| *n > 0);
        if difficulty.is_none() && config.ratings.is_none() && positive_count.is_none() {
            return Err(EncounterError::InsufficientSpecification);
        }

        let roster = match (&config.ratings, config.count) {
            (Some(RatingInput::List(list)), count) => {
                if list.is_empty() {
                    return Err(EncounterError::EmptySeries("ratings"));
                }
                if let Some(members) = count {
                    if members as usize != list.len() {
                        return Err(EncounterError::RatingCountMismatch {
                            ratings: list.len(),
                            members,
                        });
                    }
                }
                Self::classify_fixed(list.clone(), difficulty, party_size, party_levels)?
            }
            (Some(RatingInput::Single(rating)), Some(members)) if members > 0 => Self::classify_fixed(
                vec![*rating; members as usize],
                difficulty,
                party_size,
                party_levels,
            )?,
            (Some(RatingInput::Single(rating)), _) => RosterBuilder::new(party_size, party_levels)?
                .with_pool(&[*rating])
                .with_target(difficulty)
                .build(rng)?,
            (None, count) => {
                let pool = config.rating_pool.as_deref().unwrap_or(Rating::all());
                RosterBuilder::new(party_size, party_levels)?
                    .with_pool(pool)
                    .with_target(difficulty)
                    .with_member_count(count)
                    .build(rng)?
            }
        };

        Self::from_roster(config, roster, party_size, party_levels.clone())
    }

    fn classify_fixed(
        ratings: Vec<Rating>,
        requested: Option<Difficulty>,
        party_size: u32,
        party_levels: &PartyLevels,
    ) -> Result<Roster> {
        let (total_xp, derived) = calculate_difficulty(&ratings, party_size, party_levels)?;
        if let Some(requested) = requested {
            if requested != derived {
                return Err(EncounterError::DifficultyMismatch { requested, derived });
            }
        }

        Ok(Roster {
            ratings,
            total_xp,
            difficulty: derived,
        })
    }

    fn from_roster(
        config: &EnemyConfig,
        roster: Roster,
        party_size: u32,
        party_levels: PartyLevels,
    ) -> Result<Self> {
        let members = roster.ratings.len() as u32;
        let count = roster.ratings.len() as f64;

        let hit_points = match &config.hit_points {
            Some(input) => input.total("hit_points", members)?,
            None => roster.ratings.iter().map(|r| r.stats().hit_points).sum::<f64>().round(),
        };
        let to_hit = match &config.to_hit {
            Some(input) => input.rounded_average("to_hit")?,
            None => {
                let total: i32 = roster.ratings.iter().map(|r| r.stats().to_hit).sum();
                (total as f64 / count).round() as i32
            }
        };
        let average_damage = match config.average_damage {
            Some(damage) => damage,
            None => {
                let total: f64 = roster.ratings.iter().map(|r| r.stats().damage).sum();
                (total / count).round()
            }
        };
        let armor_class = config.armor_class.rounded_average("armor_class")?;

        let stats = GroupStats::new(members, to_hit, armor_class, hit_points, average_damage)?;

        tracing::debug!(
            "Enemy group {} ({} members, {} XP, {})",
            describe_ratings(&roster.ratings),
            members,
            roster.total_xp,
            roster.difficulty
        );

        Ok(Self {
            starting_hit_points: stats.hit_points,
            stats,
            difficulty: roster.difficulty,
            ratings: roster.ratings,
            total_xp: roster.total_xp,
            target_party_size: party_size,
            target_party_levels: party_levels,
        })
    }

    pub fn stats(&self) -> &GroupStats {
        &self.stats
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Ratings joined into one token string
    pub fn describe(&self) -> String {
        describe_ratings(&self.ratings)
    }

    pub fn total_xp(&self) -> f64 {
        self.total_xp
    }

    pub fn target_party_size(&self) -> u32 {
        self.target_party_size
    }

    pub fn target_party_levels(&self) -> &PartyLevels {
        &self.target_party_levels
    }

    pub fn starting_hit_points(&self) -> f64 {
        self.starting_hit_points
    }

    pub fn hit_point_fraction(&self) -> f64 {
        if self.starting_hit_points > 0.0 {
            self.stats.hit_points / self.starting_hit_points
        } else {
            0.0
        }
    }
}
