//! Runtime state attached to a live dropped item.

use crate::limiter::RateLimitState;
use crate::state::{ActorId, GlobalPos, Tick};

/// Side-table entry for one dropped item entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppedItemState {
    pub owner: Option<ActorId>,
    pub is_death_drop: bool,
    pub safe_recovery_pos: Option<GlobalPos>,
    pub original_slot: Option<usize>,
    pub rate_limit: RateLimitState,
    pub last_recovered: Option<Tick>,
}

impl DroppedItemState {
    /// Fresh state for an item dropped by `owner`'s death.
    pub fn death_drop(owner: ActorId) -> Self {
        Self {
            owner: Some(owner),
            is_death_drop: true,
            ..Self::default()
        }
    }

    /// Whether a recovery happened fewer than `debounce` ticks before `now`.
    pub fn recently_recovered(&self, now: Tick, debounce: u64) -> bool {
        self.last_recovered
            .is_some_and(|at| now >= at && now.since(at) < debounce)
    }
}

/// Why an item needs to be moved.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum RecoveryTrigger {
    /// At or below the void trigger height, now or on the next tick.
    Void,
    Lava,
    Fire,
    /// Drop spawned from a death right above the void.
    NearVoidDeath,
}

impl RecoveryTrigger {
    /// Hazard triggers extinguish the item after teleporting.
    pub const fn clears_fire(self) -> bool {
        matches!(self, Self::Lava | Self::Fire)
    }
}
