//! Small in-memory oracles shared by unit tests.

use std::collections::{BTreeMap, HashSet};

use crate::env::{ItemCategories, ItemOracle, WorldOracle};
use crate::state::{Aabb, BlockPos, DataHandle, DimensionId, Identifier, ItemHandle, ItemStack};

pub const OVERWORLD: DimensionId = DimensionId(0);
pub const NETHER: DimensionId = DimensionId(1);

pub const SOULBOUND_TRUE: DataHandle = DataHandle(7);
pub const SOULBOUND_FALSE: DataHandle = DataHandle(8);

struct StubDef {
    id: &'static str,
    max_stack: u16,
    categories: ItemCategories,
    tags: &'static [&'static str],
}

/// Fixed registry: sword, totem, bread, dirt, helmet, arrow.
pub struct StubItems {
    defs: Vec<StubDef>,
}

impl StubItems {
    pub fn new() -> Self {
        let def = |id, max_stack, categories, tags| StubDef {
            id,
            max_stack,
            categories,
            tags,
        };
        Self {
            defs: vec![
                def(
                    "diamond_sword",
                    1,
                    ItemCategories::WEAPON | ItemCategories::MELEE_WEAPON,
                    &["minecraft:swords"],
                ),
                def(
                    "totem_of_undying",
                    1,
                    ItemCategories::TOTEM,
                    &["lenientdeath:safe"],
                ),
                def("bread", 64, ItemCategories::FOOD, &[]),
                def("dirt", 64, ItemCategories::BLOCK_ITEM, &[]),
                def("iron_helmet", 1, ItemCategories::HELMET, &[]),
                def("arrow", 64, ItemCategories::ARROW, &[]),
            ],
        }
    }

    pub fn handle(&self, name: &str) -> ItemHandle {
        let index = self
            .defs
            .iter()
            .position(|d| d.id == name)
            .unwrap_or_else(|| panic!("unknown stub item {name}"));
        ItemHandle(index as u32 + 1)
    }

    pub fn stack(&self, name: &str, count: u16) -> ItemStack {
        ItemStack::new(self.handle(name), count)
    }

    fn def(&self, item: ItemHandle) -> Option<&StubDef> {
        self.defs.get((item.0 as usize).checked_sub(1)?)
    }
}

pub fn sword(count: u16) -> ItemStack {
    StubItems::new().stack("diamond_sword", count)
}

impl ItemOracle for StubItems {
    fn resolve(&self, id: &Identifier) -> Option<ItemHandle> {
        if id.namespace() != Identifier::DEFAULT_NAMESPACE {
            return None;
        }
        self.defs
            .iter()
            .position(|d| d.id == id.path())
            .map(|index| ItemHandle(index as u32 + 1))
    }

    fn items_in_tag(&self, tag: &Identifier) -> Vec<ItemHandle> {
        let tag = tag.to_string();
        self.defs
            .iter()
            .enumerate()
            .filter(|(_, d)| d.tags.contains(&tag.as_str()))
            .map(|(index, _)| ItemHandle(index as u32 + 1))
            .collect()
    }

    fn max_stack_size(&self, item: ItemHandle) -> u16 {
        self.def(item).map_or(64, |d| d.max_stack)
    }

    fn custom_flag(&self, stack: &ItemStack, key: &str) -> Option<bool> {
        let flags: BTreeMap<&str, bool> = match stack.data {
            SOULBOUND_TRUE => [("Soulbound", true)].into(),
            SOULBOUND_FALSE => [("Soulbound", false)].into(),
            _ => return None,
        };
        flags.get(key).copied()
    }

    fn categories(&self, stack: &ItemStack) -> ItemCategories {
        self.def(stack.item)
            .map_or(ItemCategories::empty(), |d| d.categories)
    }
}

/// Solid floor at `floor_y` over a square area, plus explicit edits.
pub struct FlatWorld {
    pub floor_y: i32,
    pub half_extent: i32,
    pub extra_solid: HashSet<BlockPos>,
    pub removed: HashSet<BlockPos>,
    pub fluids: HashSet<BlockPos>,
    pub spawn: BlockPos,
}

impl FlatWorld {
    pub fn new(floor_y: i32, half_extent: i32) -> Self {
        Self {
            floor_y,
            half_extent,
            extra_solid: HashSet::new(),
            removed: HashSet::new(),
            fluids: HashSet::new(),
            spawn: BlockPos::new(0, floor_y + 1, 0),
        }
    }

    /// World with no solid blocks at all.
    pub fn empty() -> Self {
        Self::new(i32::MIN / 2, -1)
    }

    fn solid(&self, pos: BlockPos) -> bool {
        if self.extra_solid.contains(&pos) {
            return true;
        }
        pos.y == self.floor_y
            && pos.x.abs() <= self.half_extent
            && pos.z.abs() <= self.half_extent
            && !self.removed.contains(&pos)
    }
}

impl WorldOracle for FlatWorld {
    fn is_solid(&self, dimension: DimensionId, pos: BlockPos) -> bool {
        dimension == OVERWORLD && self.solid(pos)
    }

    fn is_air(&self, dimension: DimensionId, pos: BlockPos) -> bool {
        !self.is_solid(dimension, pos) && !self.fluids.contains(&pos)
    }

    fn has_source_fluid(&self, dimension: DimensionId, pos: BlockPos) -> bool {
        dimension == OVERWORLD && self.fluids.contains(&pos)
    }

    fn collides(&self, dimension: DimensionId, volume: &Aabb) -> bool {
        let min = BlockPos::containing(volume.min);
        let max = BlockPos::containing(volume.max);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let pos = BlockPos::new(x, y, z);
                    if self.is_solid(dimension, pos) && Aabb::of_block(pos).intersects(volume) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn min_build_height(&self, _dimension: DimensionId) -> i32 {
        -64
    }

    fn max_build_height(&self, _dimension: DimensionId) -> i32 {
        320
    }

    fn sea_level(&self, _dimension: DimensionId) -> i32 {
        63
    }

    fn spawn_point(&self, _dimension: DimensionId) -> BlockPos {
        self.spawn
    }
}
