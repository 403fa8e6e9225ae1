pub mod difficulty;
pub mod tables;

pub use difficulty::{
    adjusted_multiplier, calculate_difficulty, classify, compute_boundaries, compute_xp,
    headcount_multiplier, raw_xp, xp_window, Boundary,
};
pub use tables::{describe_ratings, xp_threshold, Rating, RatingStats};
