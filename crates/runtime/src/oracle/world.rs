//! Block world served through [`lenient_core::WorldOracle`].
use std::collections::HashMap;

use lenient_content::{BlockKind, DimensionLayout, WorldLayout};
use lenient_core::{Aabb, BlockPos, DimensionId, WorldOracle};

/// WorldOracle implementation over sparse block maps.
///
/// Cells that were never set are air. Queries against an unknown dimension
/// see an empty world with the default bounds.
#[derive(Debug, Default)]
pub struct VoxelWorld {
    seed: u64,
    dimensions: HashMap<DimensionId, VoxelDimension>,
}

#[derive(Debug, Clone)]
struct VoxelDimension {
    min_build_height: i32,
    max_build_height: i32,
    sea_level: i32,
    spawn: BlockPos,
    blocks: HashMap<BlockPos, BlockKind>,
}

impl VoxelWorld {
    const DEFAULT_MIN_BUILD_HEIGHT: i32 = -64;
    const DEFAULT_MAX_BUILD_HEIGHT: i32 = 320;
    const DEFAULT_SEA_LEVEL: i32 = 63;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            dimensions: HashMap::new(),
        }
    }

    pub fn from_layout(layout: &WorldLayout) -> Self {
        let mut world = Self::new(layout.seed);
        for dimension in &layout.dimensions {
            world.add_dimension(dimension);
        }
        world
    }

    /// Adds (or replaces) a dimension and places its cells.
    pub fn add_dimension(&mut self, layout: &DimensionLayout) {
        let mut blocks = HashMap::new();
        for (pos, kind) in layout.cells() {
            if kind == BlockKind::Air {
                blocks.remove(&pos);
            } else {
                blocks.insert(pos, kind);
            }
        }
        self.dimensions.insert(
            layout.id,
            VoxelDimension {
                min_build_height: layout.min_build_height,
                max_build_height: layout.max_build_height,
                sea_level: layout.sea_level,
                spawn: layout.spawn,
                blocks,
            },
        );
    }

    pub fn set_block(&mut self, dimension: DimensionId, pos: BlockPos, kind: BlockKind) {
        let Some(dim) = self.dimensions.get_mut(&dimension) else {
            return;
        };
        if kind == BlockKind::Air {
            dim.blocks.remove(&pos);
        } else {
            dim.blocks.insert(pos, kind);
        }
    }

    pub fn block(&self, dimension: DimensionId, pos: BlockPos) -> BlockKind {
        self.dimensions
            .get(&dimension)
            .and_then(|dim| dim.blocks.get(&pos).copied())
            .unwrap_or_default()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl WorldOracle for VoxelWorld {
    fn is_solid(&self, dimension: DimensionId, pos: BlockPos) -> bool {
        self.block(dimension, pos).is_solid()
    }

    fn is_air(&self, dimension: DimensionId, pos: BlockPos) -> bool {
        self.block(dimension, pos) == BlockKind::Air
    }

    fn has_source_fluid(&self, dimension: DimensionId, pos: BlockPos) -> bool {
        self.block(dimension, pos).is_source_fluid()
    }

    fn collides(&self, dimension: DimensionId, volume: &Aabb) -> bool {
        let Some(dim) = self.dimensions.get(&dimension) else {
            return false;
        };
        let min = BlockPos::containing(volume.min);
        let max = BlockPos::containing(volume.max);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let pos = BlockPos::new(x, y, z);
                    let solid = dim.blocks.get(&pos).is_some_and(|kind| kind.is_solid());
                    if solid && Aabb::of_block(pos).intersects(volume) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn min_build_height(&self, dimension: DimensionId) -> i32 {
        self.dimensions
            .get(&dimension)
            .map_or(Self::DEFAULT_MIN_BUILD_HEIGHT, |dim| dim.min_build_height)
    }

    fn max_build_height(&self, dimension: DimensionId) -> i32 {
        self.dimensions
            .get(&dimension)
            .map_or(Self::DEFAULT_MAX_BUILD_HEIGHT, |dim| dim.max_build_height)
    }

    fn sea_level(&self, dimension: DimensionId) -> i32 {
        self.dimensions
            .get(&dimension)
            .map_or(Self::DEFAULT_SEA_LEVEL, |dim| dim.sea_level)
    }

    fn spawn_point(&self, dimension: DimensionId) -> BlockPos {
        self.dimensions
            .get(&dimension)
            .map_or(BlockPos::ORIGIN, |dim| dim.spawn)
    }
}
