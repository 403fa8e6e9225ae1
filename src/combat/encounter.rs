//! Turn-based encounter between a party and an enemy group
//!
//! Hit points are pooled per side. A side loses a member whenever its pool
//! falls to the current down threshold, after which the threshold becomes
//! the pool shared out over the members still standing.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::constants::{DAMAGE_BOOST_CHANCE, HEAL_AMOUNT};
use crate::combat::dice;
use crate::combat::enemies::EnemyGroup;
use crate::combat::groups::{GroupStats, Party};
use crate::combat::summary::EncounterSummary;
use crate::core::error::{EncounterError, Result};
use crate::core::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    NotStarted,
    Running,
    Concluded,
}

/// Mutable bookkeeping for one encounter
#[derive(Debug, Clone)]
pub struct EncounterState {
    pub initiative: Vec<Side>,
    /// Parallel to `initiative`
    pub down: Vec<bool>,
    pub round_count: u32,
    pub active_turn_count: u32,
    pub party_damage_since_heal: f64,
    pub pc_down_threshold: f64,
    pub enemy_down_threshold: f64,
    pub phase: EncounterPhase,
}

pub struct Encounter {
    party: Party,
    enemies: EnemyGroup,
    rng: ChaCha8Rng,
    seed: u64,
    heal_threshold: f64,
    state: EncounterState,
}

/// Convert 0/1 initiative markers into sides
pub fn parse_initiative(markers: &[u8]) -> Result<Vec<Side>> {
    markers.iter().map(|m| Side::from_marker(*m)).collect()
}

impl Encounter {
    /// Encounter with its own generator; a random seed is drawn when none is given
    pub fn new(
        party: Party,
        enemies: EnemyGroup,
        seed: Option<u64>,
        initiative: Option<Vec<Side>>,
    ) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        Self::with_rng(party, enemies, ChaCha8Rng::seed_from_u64(seed), seed, initiative)
    }

    /// Encounter driven by a caller-owned generator
    ///
    /// `seed` is only recorded in the summary.
    pub fn with_rng(
        party: Party,
        enemies: EnemyGroup,
        mut rng: ChaCha8Rng,
        seed: u64,
        initiative: Option<Vec<Side>>,
    ) -> Result<Self> {
        if party.stats.average_damage <= 0.0 && enemies.stats.average_damage <= 0.0 {
            return Err(EncounterError::NoDamage);
        }

        let pcs = party.stats.member_count as usize;
        let foes = enemies.stats.member_count as usize;

        let initiative = match initiative {
            Some(order) => {
                if order.len() != pcs + foes {
                    return Err(EncounterError::InvalidInitiative(format!(
                        "expected {} entries, found {}",
                        pcs + foes,
                        order.len()
                    )));
                }
                let pc_turns = order.iter().filter(|s| **s == Side::Pc).count();
                if pc_turns != pcs {
                    return Err(EncounterError::InvalidInitiative(format!(
                        "expected {} PC entries, found {}",
                        pcs, pc_turns
                    )));
                }
                order
            }
            None => {
                let mut order = vec![Side::Pc; pcs];
                order.extend(std::iter::repeat(Side::Enemy).take(foes));
                order.shuffle(&mut rng);
                order
            }
        };

        let heal_threshold = if pcs > 1 {
            2.0 * party.stats.hit_points / pcs as f64
        } else {
            0.5 * party.stats.hit_points
        };
        let initial_threshold = |stats: &GroupStats| {
            if stats.member_count > 1 {
                stats.hit_points / 2.0
            } else {
                0.0
            }
        };

        let state = EncounterState {
            down: vec![false; initiative.len()],
            initiative,
            round_count: 0,
            active_turn_count: 0,
            party_damage_since_heal: 0.0,
            pc_down_threshold: initial_threshold(&party.stats),
            enemy_down_threshold: initial_threshold(&enemies.stats),
            phase: EncounterPhase::NotStarted,
        };

        Ok(Self {
            party,
            enemies,
            rng,
            seed,
            heal_threshold,
            state,
        })
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn enemies(&self) -> &EnemyGroup {
        &self.enemies
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn heal_threshold(&self) -> f64 {
        self.heal_threshold
    }

    /// Run rounds until a side is beaten
    pub fn run(&mut self) -> EncounterSummary {
        while self.state.phase != EncounterPhase::Concluded {
            self.run_round();
        }

        let summary = self.summary();
        tracing::debug!(
            "Encounter seed {} concluded after {} rounds ({} turns), success={}",
            self.seed,
            summary.num_rounds,
            summary.num_turns,
            summary.success
        );
        summary
    }

    /// One pass over the initiative order, cut short once the encounter is over
    pub fn run_round(&mut self) {
        if self.state.phase == EncounterPhase::Concluded {
            return;
        }
        self.state.phase = EncounterPhase::Running;

        for idx in 0..self.state.initiative.len() {
            if !self.state.down[idx] {
                let side = self.state.initiative[idx];
                match side {
                    Side::Pc => self.pc_turn(),
                    Side::Enemy => self.enemy_turn(),
                }
                self.check_down(side.opponent());
                self.state.active_turn_count += 1;
            }

            if self.is_over() {
                break;
            }
        }

        self.state.round_count += 1;
        if self.is_over() {
            self.state.phase = EncounterPhase::Concluded;
        }
    }

    fn pc_turn(&mut self) {
        let mut boosted = false;

        if self.party.extras > 0 {
            if self.state.party_damage_since_heal >= self.heal_threshold {
                self.party.spend_extra();
                self.party.stats.hit_points += HEAL_AMOUNT;
                self.state.party_damage_since_heal = 0.0;
                self.revive_random_pc();
                tracing::trace!(
                    "Round {}: party heals to {} HP",
                    self.state.round_count,
                    self.party.stats.hit_points
                );
                return;
            }

            if self.rng.gen_bool(DAMAGE_BOOST_CHANCE) {
                boosted = self.party.spend_extra();
            }
        }

        let roll = dice::attack(
            &mut self.rng,
            self.party.stats.to_hit,
            self.enemies.stats.armor_class,
        );
        let base = if boosted {
            self.party.stats.average_damage * 2.0
        } else {
            self.party.stats.average_damage
        };
        let damage = roll.damage(base);
        self.enemies.stats.hit_points -= damage;

        tracing::trace!(
            "Round {}: PC rolls {} (boosted={}) for {} damage",
            self.state.round_count,
            roll.roll,
            boosted,
            damage
        );
    }

    fn enemy_turn(&mut self) {
        let roll = dice::attack(
            &mut self.rng,
            self.enemies.stats.to_hit,
            self.party.stats.armor_class,
        );
        let damage = roll.damage(self.enemies.stats.average_damage);
        self.party.stats.hit_points -= damage;
        self.state.party_damage_since_heal += damage;

        tracing::trace!(
            "Round {}: enemy rolls {} for {} damage",
            self.state.round_count,
            roll.roll,
            damage
        );
    }

    fn stats(&self, side: Side) -> &GroupStats {
        match side {
            Side::Pc => &self.party.stats,
            Side::Enemy => &self.enemies.stats,
        }
    }

    /// Down one member of `side` if its pool reached the threshold
    fn check_down(&mut self, side: Side) {
        let hit_points = self.stats(side).hit_points;
        let threshold = match side {
            Side::Pc => self.state.pc_down_threshold,
            Side::Enemy => self.state.enemy_down_threshold,
        };
        if hit_points > threshold {
            return;
        }

        self.down_random(side);

        let active = self.stats(side).member_count.saturating_sub(self.count_down(side));
        let next = if active <= 1 {
            0.0
        } else {
            (hit_points / active as f64).floor().max(0.0)
        };

        match side {
            Side::Pc => self.state.pc_down_threshold = next,
            Side::Enemy => self.state.enemy_down_threshold = next,
        }
    }

    fn down_random(&mut self, side: Side) {
        let standing = self.indices(side, false);
        if let Some(&idx) = standing.choose(&mut self.rng) {
            self.state.down[idx] = true;
        }
    }

    /// Healing brings back at most one downed PC
    fn revive_random_pc(&mut self) {
        let downed = self.indices(Side::Pc, true);
        if let Some(&idx) = downed.choose(&mut self.rng) {
            self.state.down[idx] = false;
        }
    }

    fn indices(&self, side: Side, down: bool) -> Vec<usize> {
        self.state
            .initiative
            .iter()
            .zip(&self.state.down)
            .enumerate()
            .filter(|(_, (s, d))| **s == side && **d == down)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn count_down(&self, side: Side) -> u32 {
        self.state
            .initiative
            .iter()
            .zip(&self.state.down)
            .filter(|(s, d)| **s == side && **d)
            .count() as u32
    }

    /// Any one of the end conditions is enough
    pub fn is_over(&self) -> bool {
        let all_pcs_down = self.count_down(Side::Pc) == self.party.stats.member_count;
        let all_enemies_down = self.count_down(Side::Enemy) == self.enemies.stats.member_count;
        let party_out = self.party.stats.hit_points <= 0.0;
        let enemies_out = self.enemies.stats.hit_points <= 0.0;

        all_pcs_down || all_enemies_down || party_out || enemies_out
    }

    pub fn summary(&self) -> EncounterSummary {
        let party_down = self.count_down(Side::Pc);
        let enemies_down = self.count_down(Side::Enemy);
        let party_members = self.party.stats.member_count;
        let enemy_members = self.enemies.stats.member_count;

        EncounterSummary {
            party_hp: self.party.stats.hit_points,
            party_extras: self.party.extras(),
            frac_party_hp: self.party.hit_point_fraction(),
            frac_party_extras: self.party.extras_fraction(),
            num_party_down: party_down,
            frac_party_down: party_down as f64 / party_members as f64,
            success: self.party.stats.hit_points > 0.0,
            enemies_hp: self.enemies.stats.hit_points,
            frac_enemies_hp: self.enemies.hit_point_fraction(),
            num_enemies_down: enemies_down,
            num_enemies: enemy_members,
            frac_enemies_down: enemies_down as f64 / enemy_members as f64,
            ratings: self.enemies.describe(),
            difficulty: self.enemies.difficulty(),
            total_xp: self.enemies.total_xp(),
            num_rounds: self.state.round_count,
            num_turns: self.state.active_turn_count,
            seed: self.seed,
        }
    }
}
