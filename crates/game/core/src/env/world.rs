//! World query oracle consumed by the recovery search.

use crate::config::DeathConfig;
use crate::state::{Aabb, BlockPos, DimensionId};

/// Read-only view of block data and world bounds.
///
/// Every query is scoped to a dimension. Implementations must be cheap and
/// side-effect free: the recovery search calls them a few thousand times per
/// item in the worst case.
pub trait WorldOracle: Send + Sync {
    /// Whether the block is a full solid block that can carry an item.
    fn is_solid(&self, dimension: DimensionId, pos: BlockPos) -> bool;

    /// Whether the block is empty.
    fn is_air(&self, dimension: DimensionId, pos: BlockPos) -> bool;

    /// Whether the block holds a stationary fluid source.
    fn has_source_fluid(&self, dimension: DimensionId, pos: BlockPos) -> bool;

    /// Whether the volume overlaps any collision shape in the dimension.
    fn collides(&self, dimension: DimensionId, volume: &Aabb) -> bool;

    /// Lowest buildable Y (inclusive).
    fn min_build_height(&self, dimension: DimensionId) -> i32;

    /// Highest buildable Y (exclusive).
    fn max_build_height(&self, dimension: DimensionId) -> i32;

    fn sea_level(&self, dimension: DimensionId) -> i32;

    /// Shared spawn column of the dimension.
    fn spawn_point(&self, dimension: DimensionId) -> BlockPos;

    /// Y at or below which a falling item counts as lost to the void.
    fn void_trigger_y(&self, dimension: DimensionId) -> f64 {
        f64::from(self.min_build_height(dimension)) - DeathConfig::VOID_TRIGGER_OFFSET
    }

    /// Whether a death at this height gets an immediate recovery pass.
    fn is_near_void(&self, dimension: DimensionId, y: f64) -> bool {
        y <= f64::from(self.min_build_height(dimension)) + DeathConfig::NEAR_VOID_DEATH_MARGIN
    }
}
