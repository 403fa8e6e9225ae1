pub mod builder;
pub mod constants;
pub mod dice;
pub mod encounter;
pub mod enemies;
pub mod groups;
pub mod summary;

pub use builder::{Roster, RosterBuilder};
pub use dice::AttackRoll;
pub use encounter::{parse_initiative, Encounter, EncounterPhase, EncounterState};
pub use enemies::{EnemyGroup, RatingInput};
pub use groups::{GroupStats, Party, StatInput};
pub use summary::EncounterSummary;
