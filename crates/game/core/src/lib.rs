//! Engine-agnostic rules for what survives a death and where lost items go.
//!
//! `lenient-core` holds the pure pieces of the death pipeline: the
//! preservation decision chain, the death inventory snapshot, per-actor
//! safe-position history, the recovery target resolver and the per-item
//! recovery limiter. Hosts plug in through the oracle traits in [`env`];
//! orchestration, logging and shared state live in the runtime crate.
pub mod capability;
pub mod config;
pub mod drop_state;
pub mod env;
pub mod error;
pub mod history;
pub mod inventory;
pub mod limiter;
pub mod preservation;
pub mod recovery;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod testing;

pub use capability::Capability;
pub use config::{
    CategoryRules, DeathConfig, FeatureConfig, ItemTypeConfig, ListConfig, MarkerConfig,
    PreservationConfig, RandomizerConfig, RecoveryConfig, RecoveryScope,
};
pub use drop_state::{DroppedItemState, RecoveryTrigger};
pub use env::{
    CategoryClassifier, DataDefinition, DeathEnv, Env, ItemCategories, ItemCategory,
    ItemClassifier, ItemDefinition, ItemOracle, PcgRng, RngOracle, WorldOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use history::SafePositionHistory;
pub use inventory::{InventoryAccess, SlotInventory, insert_into_slot};
pub use limiter::{RateLimitPolicy, RateLimitState};
pub use preservation::{
    Decision, DecisionSource, KeepContext, KeepDecision, ListEntryError, ListKind, ManualLists,
    RollSeed, keep_count,
};
pub use recovery::{ItemBody, RecoveryRequest, RecoverySource, RecoveryTarget, resolve};
pub use snapshot::InventorySnapshot;
pub use state::{
    Aabb, ActorId, BlockPos, DataHandle, DimensionId, EntityId, GlobalPos, Identifier,
    IdentifierError, ItemHandle, ItemStack, Tick, Vec3,
};
