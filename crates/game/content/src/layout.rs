//! Block-level world layouts.

use lenient_core::{BlockPos, DimensionId};

/// Contents of a single block cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    #[default]
    Air,
    Solid,
    /// Still water source.
    Water,
    /// Still lava source.
    Lava,
    /// Moving water; not a source, so it does not block recovery.
    FlowingWater,
}

impl BlockKind {
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }

    pub const fn is_source_fluid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }
}

/// One dimension: build bounds, spawn, and the blocks placed in it.
///
/// `fills` are applied first as inclusive cuboids, then `blocks` override
/// individual cells. Cells never mentioned are air.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionLayout {
    pub id: DimensionId,
    pub min_build_height: i32,
    /// Exclusive upper bound.
    pub max_build_height: i32,
    pub sea_level: i32,
    pub spawn: BlockPos,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fills: Vec<(BlockPos, BlockPos, BlockKind)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks: Vec<(BlockPos, BlockKind)>,
}

impl DimensionLayout {
    pub fn new(id: DimensionId, min_build_height: i32, max_build_height: i32) -> Self {
        Self {
            id,
            min_build_height,
            max_build_height,
            sea_level: min_build_height,
            spawn: BlockPos::new(0, min_build_height + 1, 0),
            fills: Vec::new(),
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sea_level(mut self, sea_level: i32) -> Self {
        self.sea_level = sea_level;
        self
    }

    #[must_use]
    pub fn with_spawn(mut self, spawn: BlockPos) -> Self {
        self.spawn = spawn;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, from: BlockPos, to: BlockPos, kind: BlockKind) -> Self {
        self.fills.push((from, to, kind));
        self
    }

    #[must_use]
    pub fn with_block(mut self, pos: BlockPos, kind: BlockKind) -> Self {
        self.blocks.push((pos, kind));
        self
    }

    /// Every non-air cell after fills and overrides, in placement order.
    ///
    /// Later entries win; air entries are yielded too so callers can clear
    /// cells set by an earlier fill.
    pub fn cells(&self) -> impl Iterator<Item = (BlockPos, BlockKind)> + '_ {
        let filled = self.fills.iter().flat_map(|&(from, to, kind)| {
            let (lo, hi) = corners(from, to);
            (lo.x..=hi.x).flat_map(move |x| {
                (lo.y..=hi.y)
                    .flat_map(move |y| (lo.z..=hi.z).map(move |z| (BlockPos::new(x, y, z), kind)))
            })
        });
        filled.chain(self.blocks.iter().copied())
    }
}

fn corners(a: BlockPos, b: BlockPos) -> (BlockPos, BlockPos) {
    (
        BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
        BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
    )
}

/// A whole world: world seed plus its dimensions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldLayout {
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
    pub dimensions: Vec<DimensionLayout>,
}

impl WorldLayout {
    pub fn dimension(&self, id: DimensionId) -> Option<&DimensionLayout> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}
