//! Battle group statistics and the player party
//!
//! Hit points are tracked for the group as a whole, not per member.

use serde::{Deserialize, Serialize};

use crate::combat::constants::PARTY_LEVEL;
use crate::core::config::PartyConfig;
use crate::core::error::{EncounterError, Result};

/// A stat given either as one value or as one value per member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatInput {
    Scalar(f64),
    Series(Vec<f64>),
}

impl StatInput {
    /// Mean of the supplied values
    pub fn average(&self, stat: &'static str) -> Result<f64> {
        match self {
            StatInput::Scalar(value) => Ok(*value),
            StatInput::Series(values) if values.is_empty() => Err(EncounterError::EmptySeries(stat)),
            StatInput::Series(values) => Ok(values.iter().sum::<f64>() / values.len() as f64),
        }
    }

    /// Mean rounded to the nearest integer
    pub fn rounded_average(&self, stat: &'static str) -> Result<i32> {
        Ok(self.average(stat)?.round() as i32)
    }

    /// Group total: the series sum, or the scalar times the member count
    pub fn total(&self, stat: &'static str, members: u32) -> Result<f64> {
        let total = match self {
            StatInput::Scalar(value) => value * members as f64,
            StatInput::Series(values) if values.len() != members as usize => {
                return Err(EncounterError::SeriesLengthMismatch {
                    stat,
                    expected: members,
                    found: values.len(),
                })
            }
            StatInput::Series(values) => values.iter().sum(),
        };
        Ok(total.round())
    }
}

impl From<f64> for StatInput {
    fn from(value: f64) -> Self {
        StatInput::Scalar(value)
    }
}

impl From<Vec<f64>> for StatInput {
    fn from(values: Vec<f64>) -> Self {
        StatInput::Series(values)
    }
}

/// Combat statistics shared by both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub member_count: u32,
    pub to_hit: i32,
    pub armor_class: i32,
    /// Current group total; may drop below zero during combat
    pub hit_points: f64,
    pub average_damage: f64,
}

impl GroupStats {
    pub fn new(
        member_count: u32,
        to_hit: i32,
        armor_class: i32,
        hit_points: f64,
        average_damage: f64,
    ) -> Result<Self> {
        if armor_class < 0 {
            return Err(EncounterError::NegativeArmorClass(armor_class));
        }
        if hit_points.is_nan() || hit_points < 0.0 {
            return Err(EncounterError::NegativeHitPoints(hit_points));
        }
        if average_damage.is_nan() || average_damage < 0.0 {
            return Err(EncounterError::NegativeDamage(average_damage));
        }

        Ok(Self {
            member_count,
            to_hit,
            armor_class,
            hit_points,
            average_damage,
        })
    }
}

/// The player characters
#[derive(Debug, Clone, PartialEq)]
pub struct Party {
    pub(crate) stats: GroupStats,
    pub(crate) extras: u32,
    level: u8,
    max_extras: u32,
    max_hit_points: f64,
}

impl Party {
    pub fn new(stats: GroupStats, extras: u32) -> Result<Self> {
        if stats.member_count == 0 {
            return Err(EncounterError::EmptyGroup);
        }

        Ok(Self {
            max_hit_points: stats.hit_points,
            stats,
            extras,
            level: PARTY_LEVEL,
            max_extras: extras,
        })
    }

    pub fn from_config(config: &PartyConfig) -> Result<Self> {
        if config.level != PARTY_LEVEL {
            tracing::warn!(
                "Party level {} requested; only level {} is supported",
                config.level,
                PARTY_LEVEL
            );
        }

        let stats = GroupStats::new(
            config.size,
            config.to_hit.rounded_average("to_hit")?,
            config.armor_class.rounded_average("armor_class")?,
            config.hit_points.total("hit_points", config.size)?,
            config.average_damage,
        )?;

        Self::new(stats, config.extras)
    }

    pub fn stats(&self) -> &GroupStats {
        &self.stats
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn extras(&self) -> u32 {
        self.extras
    }

    pub fn max_extras(&self) -> u32 {
        self.max_extras
    }

    pub fn max_hit_points(&self) -> f64 {
        self.max_hit_points
    }

    pub fn hit_point_fraction(&self) -> f64 {
        if self.max_hit_points > 0.0 {
            self.stats.hit_points / self.max_hit_points
        } else {
            0.0
        }
    }

    pub fn extras_fraction(&self) -> f64 {
        if self.max_extras > 0 {
            self.extras as f64 / self.max_extras as f64
        } else {
            0.0
        }
    }

    /// Spend one extra; false when none remain
    pub(crate) fn spend_extra(&mut self) -> bool {
        if self.extras == 0 {
            return false;
        }
        self.extras -= 1;
        true
    }
}
