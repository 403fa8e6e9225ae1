//! Encounter calibration tool
//!
//! Prints the XP boundaries for a party and builds an enemy roster that
//! classifies as the requested difficulty.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use encounter_calibration::combat::RosterBuilder;
use encounter_calibration::core::error::Result;
use encounter_calibration::core::types::{Difficulty, PartyLevels};
use encounter_calibration::rules::{compute_boundaries, describe_ratings, raw_xp, xp_window, Rating};

#[derive(Parser, Debug)]
#[command(name = "calibrate")]
#[command(about = "Build an enemy roster for a requested difficulty")]
struct Args {
    /// Requested difficulty: easy, medium, hard, or deadly
    difficulty: Difficulty,

    /// Number of party members
    #[arg(long, default_value_t = 5)]
    party_size: u32,

    /// Fix the number of enemies
    #[arg(long)]
    enemies: Option<u32>,

    /// Restrict the ratings to draw from (repeatable, e.g. --rating 1/4)
    #[arg(long = "rating")]
    ratings: Vec<Rating>,

    /// Random seed for deterministic rosters
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encounter_calibration=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let levels = PartyLevels::Uniform(1);

    let boundaries = compute_boundaries(args.party_size, &levels)?;
    println!("Party of {} (level 1)", args.party_size);
    for boundary in &boundaries {
        let (lower, upper) = xp_window(boundary.difficulty, &boundaries);
        println!("  {:<7} {:>7.1} .. {:>7.1} XP", boundary.difficulty, lower, upper);
    }

    let mut builder = RosterBuilder::new(args.party_size, &levels)?
        .with_target(Some(args.difficulty))
        .with_member_count(args.enemies);
    if !args.ratings.is_empty() {
        builder = builder.with_pool(&args.ratings);
    }

    let roster = builder.build(&mut rng)?;
    println!();
    println!("Seed:       {}", seed);
    println!("Roster:     {}", describe_ratings(&roster.ratings));
    println!("Members:    {}", roster.ratings.len());
    println!("Raw XP:     {}", raw_xp(&roster.ratings));
    println!("Adjusted:   {}", roster.total_xp);
    println!("Difficulty: {}", roster.difficulty);

    Ok(())
}
