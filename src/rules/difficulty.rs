//! Encounter difficulty calculation
//!
//! Raw XP is scaled by a headcount multiplier, the multiplier is shifted by
//! party size, and the result is classified against the party's boundaries.

use crate::core::error::{EncounterError, Result};
use crate::core::types::{Difficulty, PartyLevels};
use crate::rules::tables::{xp_threshold, Rating};

/// Tolerance so that an XP total equal to a threshold reaches that category
pub const CLASSIFY_EPSILON: f64 = 0.005;

/// Lowest multiplier after the party-size shift
pub const MIN_MULTIPLIER: f64 = 0.5;
/// Highest multiplier after the party-size shift
pub const MAX_MULTIPLIER: f64 = 5.0;

/// Upper XP bound for deadly, as a multiple of the deadly threshold
pub const DEADLY_CEILING_FACTOR: f64 = 3.0;

/// Lower XP boundary of one difficulty category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub difficulty: Difficulty,
    pub threshold: f64,
}

/// Multiplier for the number of enemies in the encounter
pub fn headcount_multiplier(enemy_count: usize) -> f64 {
    match enemy_count {
        0 | 1 => 1.0,
        2 => 1.5,
        3..=6 => 2.0,
        7..=10 => 2.5,
        11..=14 => 3.0,
        _ => 4.0,
    }
}

/// Headcount multiplier shifted for small (<3) or large (>5) parties
pub fn adjusted_multiplier(enemy_count: usize, party_size: u32) -> f64 {
    let base = headcount_multiplier(enemy_count);
    let adjusted = if party_size < 3 {
        if base < 3.0 {
            base + 0.5
        } else {
            base + 1.0
        }
    } else if party_size > 5 {
        if base < 4.0 {
            base - 0.5
        } else {
            base - 1.0
        }
    } else {
        base
    };
    adjusted.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

/// Sum of raw XP values, before any multiplier
pub fn raw_xp(ratings: &[Rating]) -> u64 {
    ratings.iter().map(|r| u64::from(r.xp())).sum()
}

/// Adjusted XP total of a roster facing a party of `party_size`
pub fn compute_xp(ratings: &[Rating], party_size: u32) -> f64 {
    raw_xp(ratings) as f64 * adjusted_multiplier(ratings.len(), party_size)
}

/// Category boundaries in severity order
pub fn compute_boundaries(party_size: u32, levels: &PartyLevels) -> Result<[Boundary; 4]> {
    let mut boundaries = [Boundary {
        difficulty: Difficulty::Easy,
        threshold: 0.0,
    }; 4];

    for (slot, difficulty) in boundaries.iter_mut().zip(Difficulty::all()) {
        let threshold = match levels {
            PartyLevels::Uniform(level) => xp_threshold(*level, *difficulty)?.checked_mul(party_size),
            PartyLevels::Mixed(list) => {
                let mut total = Some(0u32);
                for level in list {
                    let value = xp_threshold(*level, *difficulty)?;
                    total = total.and_then(|t| t.checked_add(value));
                }
                total
            }
        }
        .ok_or_else(|| {
            EncounterError::InvalidConfig(format!(
                "{} threshold for a party of {} does not fit in an XP total",
                difficulty, party_size
            ))
        })?;
        *slot = Boundary {
            difficulty: *difficulty,
            threshold: threshold as f64,
        };
    }

    Ok(boundaries)
}

/// Highest category whose threshold the XP total reaches, else the lowest
pub fn classify(xp_total: f64, boundaries: &[Boundary]) -> Difficulty {
    boundaries
        .iter()
        .filter(|b| b.threshold <= xp_total + CLASSIFY_EPSILON)
        .map(|b| b.difficulty)
        .max()
        .or_else(|| boundaries.iter().map(|b| b.difficulty).min())
        .unwrap_or(Difficulty::Easy)
}

/// XP range `[lower, upper)` a roster must land in to classify as `target`
///
/// Deadly is open-ended, so its upper bound is a multiple of its threshold.
pub fn xp_window(target: Difficulty, boundaries: &[Boundary]) -> (f64, f64) {
    let threshold_of = |d: Difficulty| {
        boundaries
            .iter()
            .find(|b| b.difficulty == d)
            .map(|b| b.threshold)
            .unwrap_or(0.0)
    };

    let lower = threshold_of(target);
    let upper = match target.harder() {
        Some(next) => threshold_of(next),
        None => lower * DEADLY_CEILING_FACTOR,
    };
    (lower, upper)
}

/// Adjusted XP and category of a roster
pub fn calculate_difficulty(
    ratings: &[Rating],
    party_size: u32,
    levels: &PartyLevels,
) -> Result<(f64, Difficulty)> {
    let boundaries = compute_boundaries(party_size, levels)?;
    let xp = compute_xp(ratings, party_size);
    Ok((xp, classify(xp, &boundaries)))
}
