//! Combat system constants - all tunable values in one place

// Dice
pub const DIE_SIDES: u32 = 20;
pub const NATURAL_MISS: u32 = 1;
pub const NATURAL_CRIT: u32 = 20;

// Party resources
pub const HEAL_AMOUNT: f64 = 5.0;
pub const DAMAGE_BOOST_CHANCE: f64 = 0.1;
pub const PARTY_LEVEL: u8 = 1;

// Roster building
pub const MAX_ROSTER_SIZE: usize = 20;
pub const EARLY_STOP_CHANCE: f64 = 0.5;
pub const ATTEMPTS_PER_POOL: usize = 16;

// Defaults for unspecified stats
pub const DEFAULT_PARTY_SIZE: u32 = 5;
pub const DEFAULT_PARTY_EXTRAS: u32 = 5;
pub const DEFAULT_PARTY_TO_HIT: f64 = 5.0;
pub const DEFAULT_ARMOR_CLASS: f64 = 13.0;
pub const DEFAULT_PC_HIT_POINTS: f64 = 25.0 / 3.0;
pub const DEFAULT_PARTY_DAMAGE: f64 = 6.0;
