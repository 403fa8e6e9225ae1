pub mod config;
pub mod error;
pub mod types;

pub use config::{BatchConfig, EnemyConfig, PartyConfig};
pub use error::{EncounterError, Result};
pub use types::{Difficulty, PartyLevels, Side};
