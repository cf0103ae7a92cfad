//! Bounded spatial searches for a valid recovery spot.

use crate::config::DeathConfig;
use crate::env::WorldOracle;
use crate::state::{BlockPos, DimensionId};

use super::validity::{ItemBody, is_valid_spot};

/// Validates a preferred point, falling back to the nearest valid cell on
/// the same Y within [`DeathConfig::PERTURB_RADIUS`].
pub fn validate_or_perturb(
    world: &dyn WorldOracle,
    dimension: DimensionId,
    body: &ItemBody,
    preferred: BlockPos,
) -> Option<BlockPos> {
    if is_valid_spot(world, dimension, body, preferred) {
        return Some(preferred);
    }

    let radius = DeathConfig::PERTURB_RADIUS;
    let mut best: Option<(i64, BlockPos)> = None;
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            if dx == 0 && dz == 0 {
                continue;
            }
            let candidate = preferred.offset(dx, 0, dz);
            let distance = candidate.distance_sq(preferred);
            if best.is_some_and(|(best_distance, _)| distance >= best_distance) {
                continue;
            }
            if is_valid_spot(world, dimension, body, candidate) {
                best = Some((distance, candidate));
            }
        }
    }
    best.map(|(_, pos)| pos)
}

/// Closest valid cell around `center` within a box of `horizontal` blocks
/// each way and `vertical` blocks up and down, clamped to the build range.
pub fn find_nearest_safe_spot(
    world: &dyn WorldOracle,
    dimension: DimensionId,
    body: &ItemBody,
    center: BlockPos,
    horizontal: i32,
    vertical: i32,
) -> Option<BlockPos> {
    let min_y = (world.min_build_height(dimension) + 1).max(center.y.saturating_sub(vertical));
    let max_y = (world.max_build_height(dimension) - 2).min(center.y.saturating_add(vertical));

    let mut best: Option<(i64, BlockPos)> = None;
    for y in min_y..=max_y {
        for dx in -horizontal..=horizontal {
            for dz in -horizontal..=horizontal {
                let candidate = BlockPos::new(center.x + dx, y, center.z + dz);
                let distance = candidate.distance_sq(center);
                if best.is_some_and(|(best_distance, _)| distance >= best_distance) {
                    continue;
                }
                if is_valid_spot(world, dimension, body, candidate) {
                    best = Some((distance, candidate));
                }
            }
        }
    }
    best.map(|(_, pos)| pos)
}
