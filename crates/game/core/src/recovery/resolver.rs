use crate::config::DeathConfig;
use crate::env::WorldOracle;
use crate::history::SafePositionHistory;
use crate::state::{BlockPos, DimensionId, GlobalPos};

use super::search::{find_nearest_safe_spot, validate_or_perturb};
use super::validity::ItemBody;

/// Strategy tier that produced a recovery destination.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum RecoverySource {
    /// Nearest same-dimension entry of the owner's safe-position history.
    OwnerHistory,
    /// Safe point stored on the item when it was dropped.
    ItemSafePos,
    #[strum(serialize = "nearest_3d")]
    Nearest3d,
    SpawnNearest,
    /// Spawn column at sea level, used when every search came up empty.
    SpawnFallback,
}

/// Destination for a teleport, as a feet block position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryTarget {
    pub pos: BlockPos,
    pub source: RecoverySource,
}

/// Everything the resolver needs to know about one item.
#[derive(Clone, Copy, Debug)]
pub struct RecoveryRequest<'a> {
    pub dimension: DimensionId,
    pub body: ItemBody,
    /// History of the owning actor, if the item has a known owner.
    pub owner_history: Option<&'a SafePositionHistory>,
    pub stored_safe_pos: Option<GlobalPos>,
}

/// Picks a recovery destination.
///
/// Strategies run in order and the first validated position wins. The last
/// tier needs no validation, so this always returns.
pub fn resolve(world: &dyn WorldOracle, request: &RecoveryRequest<'_>) -> RecoveryTarget {
    let dimension = request.dimension;
    let body = &request.body;
    let item_pos = BlockPos::containing(body.position);

    let from_history = request
        .owner_history
        .and_then(|history| history.best_match(dimension, item_pos))
        .and_then(|preferred| validate_or_perturb(world, dimension, body, preferred));
    if let Some(pos) = from_history {
        return RecoveryTarget {
            pos,
            source: RecoverySource::OwnerHistory,
        };
    }

    let from_stored = request
        .stored_safe_pos
        .filter(|stored| stored.dimension == dimension)
        .and_then(|stored| validate_or_perturb(world, dimension, body, stored.pos));
    if let Some(pos) = from_stored {
        return RecoveryTarget {
            pos,
            source: RecoverySource::ItemSafePos,
        };
    }

    if let Some(pos) = find_nearest_safe_spot(
        world,
        dimension,
        body,
        item_pos,
        DeathConfig::NEAREST_SEARCH_HORIZONTAL,
        DeathConfig::NEAREST_SEARCH_VERTICAL,
    ) {
        return RecoveryTarget {
            pos,
            source: RecoverySource::Nearest3d,
        };
    }

    let spawn = world.spawn_point(dimension);
    if let Some(pos) = find_nearest_safe_spot(
        world,
        dimension,
        body,
        spawn,
        DeathConfig::SPAWN_SEARCH_HORIZONTAL,
        DeathConfig::SPAWN_SEARCH_VERTICAL,
    ) {
        return RecoveryTarget {
            pos,
            source: RecoverySource::SpawnNearest,
        };
    }

    let y = (world.min_build_height(dimension) + 1).max(world.sea_level(dimension));
    RecoveryTarget {
        pos: BlockPos::new(spawn.x, y, spawn.z),
        source: RecoverySource::SpawnFallback,
    }
}
