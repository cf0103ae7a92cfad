//! Fixtures shared by unit tests.

use lenient_content::{BlockKind, DimensionLayout, WorldLayout};
use lenient_core::{
    BlockPos, DataDefinition, DataHandle, DimensionId, Identifier, ItemCategories, ItemDefinition,
    ItemHandle,
};

use crate::oracle::{ItemCatalog, VoxelWorld};

pub const OVERWORLD: DimensionId = DimensionId(0);
pub const NETHER: DimensionId = DimensionId(1);
pub const SOULBOUND: DataHandle = DataHandle(7);

fn id(raw: &str) -> Identifier {
    Identifier::parse(raw).expect("valid identifier")
}

/// Sword, totem, bread, dirt, helmet, arrow; data 7 is soulbound.
pub fn catalog() -> ItemCatalog {
    let mut items = ItemCatalog::new();
    let defs = [
        ItemDefinition::new(ItemHandle(1), id("diamond_sword"), 1)
            .with_categories(ItemCategories::WEAPON | ItemCategories::MELEE_WEAPON)
            .with_tag(id("swords")),
        ItemDefinition::new(ItemHandle(2), id("totem_of_undying"), 1)
            .with_categories(ItemCategories::TOTEM)
            .with_tag(id("lenientdeath:safe")),
        ItemDefinition::new(ItemHandle(3), id("bread"), 64).with_categories(ItemCategories::FOOD),
        ItemDefinition::new(ItemHandle(4), id("dirt"), 64)
            .with_categories(ItemCategories::BLOCK_ITEM),
        ItemDefinition::new(ItemHandle(5), id("iron_helmet"), 1)
            .with_categories(ItemCategories::HELMET),
        ItemDefinition::new(ItemHandle(6), id("arrow"), 64).with_categories(ItemCategories::ARROW),
    ];
    for def in defs {
        items.add_definition(def);
    }
    items.add_data(DataDefinition {
        handle: SOULBOUND,
        flags: [("Soulbound".to_string(), true)].into(),
    });
    items
}

/// 17x17 stone platform at y=64 centered on the origin, void elsewhere.
pub fn island() -> VoxelWorld {
    VoxelWorld::from_layout(&WorldLayout {
        seed: 1,
        dimensions: vec![
            DimensionLayout::new(OVERWORLD, -64, 320)
                .with_sea_level(63)
                .with_spawn(BlockPos::new(0, 65, 0))
                .with_fill(
                    BlockPos::new(-8, 64, -8),
                    BlockPos::new(8, 64, 8),
                    BlockKind::Solid,
                ),
        ],
    })
}
