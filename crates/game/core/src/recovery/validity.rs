use crate::env::WorldOracle;
use crate::state::{Aabb, BlockPos, DimensionId, Vec3};

/// Physical footprint of a dropped item at its current position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemBody {
    pub position: Vec3,
    pub bounds: Aabb,
}

impl ItemBody {
    /// Bounds translated so the item rests on the floor of `feet`.
    pub fn bounds_at(&self, feet: BlockPos) -> Aabb {
        self.bounds.translated(feet.bottom_center() - self.position)
    }
}

/// Whether an item can be placed standing in `feet`.
///
/// Requires a solid floor, air in the feet and head cells, no source fluid
/// in any of the three cells, and no collision for the moved bounds.
pub fn is_valid_spot(
    world: &dyn WorldOracle,
    dimension: DimensionId,
    body: &ItemBody,
    feet: BlockPos,
) -> bool {
    let floor = feet.below();
    let head = feet.above();

    if !world.is_solid(dimension, floor) {
        return false;
    }
    if !world.is_air(dimension, feet) || !world.is_air(dimension, head) {
        return false;
    }
    if [floor, feet, head]
        .into_iter()
        .any(|pos| world.has_source_fluid(dimension, pos))
    {
        return false;
    }
    !world.collides(dimension, &body.bounds_at(feet))
}
