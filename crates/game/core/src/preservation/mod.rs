//! Preservation decision chain.
//!
//! Decides how many units of a dropped stack survive the death. Tiers are
//! evaluated in order and the first one with an opinion wins:
//!
//! 1. custom-data marker
//! 2. manual lists (dropped wins over preserved)
//! 3. type classifier
//! 4. per-unit random rolls
mod decision;
mod lists;
mod marker;
mod randomizer;

pub use decision::Decision;
pub use lists::{ListEntryError, ListKind, ManualLists};
pub use marker::marker_verdict;
pub use randomizer::{RollSeed, keep_chance, roll_keep_count};

use crate::config::DeathConfig;
use crate::env::DeathEnv;
use crate::state::ItemStack;

/// Tier of the chain that produced a keep count.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DecisionSource {
    /// Preservation is switched off.
    Disabled,
    Marker,
    ManualList,
    ItemType,
    Randomizer,
}

/// Units to keep out of a stack and the tier that decided it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeepDecision {
    pub keep: u16,
    pub source: DecisionSource,
}

impl KeepDecision {
    const fn all_or_nothing(keep_all: bool, count: u16, source: DecisionSource) -> Self {
        Self {
            keep: if keep_all { count } else { 0 },
            source,
        }
    }

    pub const fn keeps_all(&self, stack: &ItemStack) -> bool {
        self.keep >= stack.count
    }
}

/// Actor-specific inputs to the chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeepContext {
    /// Luck attribute of the dying actor.
    pub luck: f32,
    pub seed: RollSeed,
}

/// Runs the decision chain for one stack. The result is always within
/// `0..=stack.count`.
pub fn keep_count(
    env: &DeathEnv<'_>,
    config: &DeathConfig,
    lists: &ManualLists,
    ctx: &KeepContext,
    stack: &ItemStack,
) -> KeepDecision {
    let count = stack.count;
    if !config.preservation.enabled {
        return KeepDecision {
            keep: 0,
            source: DecisionSource::Disabled,
        };
    }

    let items = env.items();
    if let Some(keep) = marker_verdict(&config.marker, items, stack) {
        return KeepDecision::all_or_nothing(keep, count, DecisionSource::Marker);
    }

    if let Some(keep) = lists.verdict(stack) {
        return KeepDecision::all_or_nothing(keep, count, DecisionSource::ManualList);
    }

    if config.item_types.enabled {
        let verdict = env
            .classifier()
            .classify(items, stack, &config.item_types.rules);
        if let Some(keep) = verdict.as_verdict() {
            return KeepDecision::all_or_nothing(keep, count, DecisionSource::ItemType);
        }
    }

    let chance = keep_chance(&config.randomizer, ctx.luck);
    KeepDecision {
        keep: roll_keep_count(chance, count, env.rng(), &ctx.seed),
        source: DecisionSource::Randomizer,
    }
}
