//! Per-unit random keep rolls for stacks no rule decided.

use crate::config::RandomizerConfig;
use crate::env::{RngOracle, compute_seed};
use crate::state::{ActorId, Tick};

/// Seed inputs for one stack's rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollSeed {
    pub world_seed: u64,
    pub tick: Tick,
    pub actor: ActorId,
    /// Position of the stack within the death's drop list.
    pub drop_index: u32,
}

impl RollSeed {
    fn for_unit(&self, unit: u16) -> u64 {
        let context = self.drop_index.wrapping_shl(16) | u32::from(unit);
        compute_seed(self.world_seed, self.tick.0, self.actor.seed_bits(), context)
    }
}

/// Probability that a single unit is kept, in `[0, 1]`.
///
/// `chance * (1 + multiplier * luck) + additive * luck`, with chance and
/// additive given in percent.
pub fn keep_chance(config: &RandomizerConfig, luck: f32) -> f32 {
    if !config.enabled {
        return 0.0;
    }
    let chance = config.chance_percent as f32 / 100.0;
    let additive = config.luck_additive as f32 / 100.0;
    let multiplier = config.luck_multiplier as f32;
    (chance * (1.0 + multiplier * luck) + additive * luck).clamp(0.0, 1.0)
}

/// Number of units out of `count` that survive independent rolls.
pub fn roll_keep_count(chance: f32, count: u16, rng: &dyn RngOracle, seed: &RollSeed) -> u16 {
    if chance >= 1.0 {
        return count;
    }
    if chance <= 0.0 {
        return 0;
    }
    (0..count)
        .filter(|unit| rng.unit_f32(seed.for_unit(*unit)) < chance)
        .count() as u16
}
