//! Many independent encounters with aggregated results
//!
//! Run `i` of a batch uses seed `base + i` for both roster building and
//! combat, so any single row can be replayed on its own.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::combat::{parse_initiative, Encounter, EncounterSummary, EnemyGroup, Party};
use crate::core::config::BatchConfig;
use crate::core::error::Result;
use crate::core::types::PartyLevels;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub simulations: u32,
    pub successes: u32,
    pub success_rate: f64,
    pub mean_rounds: f64,
    pub mean_turns: f64,
    pub mean_frac_party_hp: f64,
    pub mean_frac_party_extras: f64,
    pub mean_frac_party_down: f64,
    pub mean_total_xp: f64,
}

impl BatchStats {
    pub fn from_rows(rows: &[EncounterSummary]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let n = rows.len() as f64;
        let mean = |f: fn(&EncounterSummary) -> f64| rows.iter().map(f).sum::<f64>() / n;
        let successes = rows.iter().filter(|r| r.success).count() as u32;

        Self {
            simulations: rows.len() as u32,
            successes,
            success_rate: successes as f64 / n,
            mean_rounds: mean(|r| r.num_rounds as f64),
            mean_turns: mean(|r| r.num_turns as f64),
            mean_frac_party_hp: mean(|r| r.frac_party_hp),
            mean_frac_party_extras: mean(|r| r.frac_party_extras),
            mean_frac_party_down: mean(|r| r.frac_party_down),
            mean_total_xp: mean(|r| r.total_xp),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub base_seed: u64,
    pub rows: Vec<EncounterSummary>,
    pub stats: BatchStats,
}

impl BatchReport {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} encounters (base seed {}): {:.1}% success, {:.2} rounds, {:.2} turns on average\n\
             party ends with {:.1}% HP, {:.1}% extras, {:.1}% down; mean enemy XP {:.1}",
            self.stats.simulations,
            self.base_seed,
            self.stats.success_rate * 100.0,
            self.stats.mean_rounds,
            self.stats.mean_turns,
            self.stats.mean_frac_party_hp * 100.0,
            self.stats.mean_frac_party_extras * 100.0,
            self.stats.mean_frac_party_down * 100.0,
            self.stats.mean_total_xp,
        )
    }
}

/// Build both groups from the configuration and fight one encounter
pub fn run_single(config: &BatchConfig, seed: u64) -> Result<EncounterSummary> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let party = Party::from_config(&config.party)?;
    let enemies = EnemyGroup::from_config(
        &config.enemies,
        config.difficulty,
        party.stats().member_count,
        &PartyLevels::Uniform(party.level()),
        &mut rng,
    )?;
    let initiative = config
        .initiative
        .as_deref()
        .map(parse_initiative)
        .transpose()?;

    let mut encounter = Encounter::with_rng(party, enemies, rng, seed, initiative)?;
    Ok(encounter.run())
}

/// Run every simulation of the batch in parallel
///
/// Rows keep simulation order. The first failing run aborts the batch.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport> {
    config.validate()?;
    let base_seed = config.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Running {} encounters (difficulty {:?}, base seed {})",
        config.simulations,
        config.difficulty,
        base_seed
    );

    let rows = (0..config.simulations)
        .into_par_iter()
        .map(|i| run_single(config, base_seed.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>>>()?;

    let stats = BatchStats::from_rows(&rows);
    tracing::info!(
        "Batch finished: {}/{} successes",
        stats.successes,
        stats.simulations
    );

    Ok(BatchReport {
        base_seed,
        rows,
        stats,
    })
}

/// Header plus one line per encounter
pub fn write_csv<W: Write>(rows: &[EncounterSummary], mut writer: W) -> Result<()> {
    writeln!(writer, "{}", EncounterSummary::CSV_HEADER)?;
    for row in rows {
        writeln!(writer, "{}", row.to_csv_row())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Difficulty;

    fn easy_config(simulations: usize) -> BatchConfig {
        BatchConfig {
            difficulty: Some(Difficulty::Easy),
            simulations,
            seed: Some(1234),
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_batch_rows_in_seed_order() {
        let report = run_batch(&easy_config(16)).unwrap();
        assert_eq!(report.rows.len(), 16);
        for (i, row) in report.rows.iter().enumerate() {
            assert_eq!(row.seed, 1234 + i as u64);
            assert_eq!(row.difficulty, Difficulty::Easy);
        }
        assert_eq!(report.stats.simulations, 16);
    }

    #[test]
    fn test_single_run_replays_batch_row() {
        let config = easy_config(4);
        let report = run_batch(&config).unwrap();
        let replay = run_single(&config, 1236).unwrap();
        assert_eq!(replay, report.rows[2]);
    }

    #[test]
    fn test_stats_from_rows() {
        let report = run_batch(&easy_config(8)).unwrap();
        let stats = &report.stats;
        assert!(stats.success_rate >= 0.0 && stats.success_rate <= 1.0);
        assert_eq!(
            stats.successes as usize,
            report.rows.iter().filter(|r| r.success).count()
        );
        assert!(stats.mean_rounds >= 1.0);
        assert_eq!(BatchStats::from_rows(&[]), BatchStats::default());
    }

    #[test]
    fn test_write_csv() {
        let report = run_batch(&easy_config(3)).unwrap();
        let mut out = Vec::new();
        write_csv(&report.rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], EncounterSummary::CSV_HEADER);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = BatchConfig {
            simulations: 0,
            ..easy_config(1)
        };
        assert!(run_batch(&config).is_err());
    }
}
