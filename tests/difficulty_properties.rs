//! Property tests for XP classification and roster building

use encounter_calibration::combat::RosterBuilder;
use encounter_calibration::core::{Difficulty, PartyLevels};
use encounter_calibration::rules::{calculate_difficulty, compute_boundaries, Rating};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rating() -> impl Strategy<Value = Rating> {
    prop::sample::select(Rating::all().to_vec())
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::all().to_vec())
}

proptest! {
    #[test]
    fn test_adding_an_enemy_never_lowers_difficulty(
        ratings in prop::collection::vec(rating(), 1..15),
        extra in rating(),
        party_size in 1u32..=8,
        level in 1u8..=5,
    ) {
        let levels = PartyLevels::Uniform(level);
        let (xp, before) = calculate_difficulty(&ratings, party_size, &levels).unwrap();

        let mut grown = ratings.clone();
        grown.push(extra);
        let (grown_xp, after) = calculate_difficulty(&grown, party_size, &levels).unwrap();

        prop_assert!(grown_xp >= xp);
        prop_assert!(after >= before);
    }

    #[test]
    fn test_boundaries_strictly_increase(
        party_size in 1u32..=10,
        levels in prop::collection::vec(1u8..=5, 1..8),
    ) {
        for party_levels in [PartyLevels::Uniform(levels[0]), PartyLevels::Mixed(levels.clone())] {
            let boundaries = compute_boundaries(party_size, &party_levels).unwrap();
            prop_assert!(boundaries[0].threshold > 0.0);
            prop_assert!(boundaries.windows(2).all(|w| w[0].threshold < w[1].threshold));
        }
    }

    #[test]
    fn test_builder_hits_reachable_target(
        target in difficulty(),
        party_size in 3u32..=5,
        seed in any::<u64>(),
    ) {
        let roster = RosterBuilder::new(party_size, &PartyLevels::Uniform(1))
            .unwrap()
            .with_target(Some(target))
            .build(&mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();

        prop_assert_eq!(roster.difficulty, target);
        prop_assert!(!roster.ratings.is_empty());
    }
}
