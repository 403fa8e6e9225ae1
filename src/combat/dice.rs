//! d20 attack resolution

use rand::Rng;

use crate::combat::constants::{DIE_SIDES, NATURAL_CRIT, NATURAL_MISS};

/// Outcome of one attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub roll: u32,
    pub hit: bool,
    pub critical: bool,
}

impl AttackRoll {
    /// Resolve a known die result against an armor class
    ///
    /// A natural 1 always misses; a natural 20 always hits and is critical.
    pub fn resolve(roll: u32, to_hit: i32, armor_class: i32) -> Self {
        let critical = roll == NATURAL_CRIT;
        let hit = roll != NATURAL_MISS && (critical || roll as i32 + to_hit >= armor_class);
        Self {
            roll,
            hit,
            critical: hit && critical,
        }
    }

    /// Damage dealt by this roll; critical hits double it
    pub fn damage(&self, base: f64) -> f64 {
        match (self.hit, self.critical) {
            (false, _) => 0.0,
            (true, false) => base,
            (true, true) => base * 2.0,
        }
    }
}

pub fn roll_d20<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=DIE_SIDES)
}

pub fn attack<R: Rng + ?Sized>(rng: &mut R, to_hit: i32, armor_class: i32) -> AttackRoll {
    AttackRoll::resolve(roll_d20(rng), to_hit, armor_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_natural_one_always_misses() {
        let roll = AttackRoll::resolve(1, 50, 10);
        assert!(!roll.hit);
        assert_eq!(roll.damage(8.0), 0.0);
    }

    #[test]
    fn test_natural_twenty_always_hits_double() {
        let roll = AttackRoll::resolve(20, -10, 30);
        assert!(roll.hit && roll.critical);
        assert_eq!(roll.damage(4.5), 9.0);
    }

    #[test]
    fn test_meet_armor_class_hits() {
        assert!(AttackRoll::resolve(8, 5, 13).hit);
        assert!(!AttackRoll::resolve(7, 5, 13).hit);
    }

    #[test]
    fn test_rolls_stay_on_die() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let r = roll_d20(&mut rng);
            assert!((1..=20).contains(&r));
        }
    }
}
