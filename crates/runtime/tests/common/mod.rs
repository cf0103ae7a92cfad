#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use lenient_content::{BlockKind, DimensionLayout, WorldLayout};
use lenient_core::{
    ActorId, BlockPos, DataDefinition, DataHandle, DeathConfig, DimensionId, EntityId, GlobalPos,
    Identifier, InventoryAccess, ItemCategories, ItemDefinition, ItemHandle, ItemOracle,
    ItemStack, SlotInventory, Tick, Vec3, WorldOracle,
};
use lenient_runtime::{
    ActorTick, DeathContext, DeathNotifier, DeathOrchestrator, DropReport, InMemoryItems, ItemCatalog,
    ItemEntity, OracleManager, OrchestratorBuilder, OwnerMarker, TickReport, VoxelWorld,
};

pub const OVERWORLD: DimensionId = DimensionId(0);
pub const ALEX: ActorId = ActorId(1);
pub const SOULBOUND: DataHandle = DataHandle(7);
pub const SLOTS: usize = 36;

fn id(raw: &str) -> Identifier {
    Identifier::parse(raw).expect("valid identifier")
}

pub fn catalog() -> ItemCatalog {
    let mut items = ItemCatalog::new();
    let defs = [
        ItemDefinition::new(ItemHandle(1), id("diamond_sword"), 1)
            .with_categories(ItemCategories::WEAPON | ItemCategories::MELEE_WEAPON),
        ItemDefinition::new(ItemHandle(2), id("totem_of_undying"), 1)
            .with_categories(ItemCategories::TOTEM)
            .with_tag(id("lenientdeath:safe")),
        ItemDefinition::new(ItemHandle(3), id("bread"), 64).with_categories(ItemCategories::FOOD),
        ItemDefinition::new(ItemHandle(4), id("dirt"), 64)
            .with_categories(ItemCategories::BLOCK_ITEM),
        ItemDefinition::new(ItemHandle(5), id("iron_helmet"), 1)
            .with_categories(ItemCategories::HELMET),
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

/// 17x17 platform at y=64 around the origin, void elsewhere.
pub fn island() -> WorldLayout {
    WorldLayout {
        seed: 7,
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
    }
}

/// Same bounds and spawn as [`island`], but no blocks at all.
pub fn nothing() -> WorldLayout {
    WorldLayout {
        seed: 7,
        dimensions: vec![
            DimensionLayout::new(OVERWORLD, -64, 320)
                .with_sea_level(63)
                .with_spawn(BlockPos::new(0, 65, 0)),
        ],
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(ActorId, GlobalPos)>>,
}

impl DeathNotifier for RecordingNotifier {
    fn death_coordinates(&self, actor: ActorId, pos: GlobalPos) {
        self.sent.lock().unwrap().push((actor, pos));
    }
}

#[derive(Default)]
pub struct RecordingMarker {
    pub marked: Mutex<Vec<(EntityId, ActorId)>>,
}

impl OwnerMarker for RecordingMarker {
    fn mark_owned(&self, entity: EntityId, owner: ActorId) {
        self.marked.lock().unwrap().push((entity, owner));
    }
}

/// Host simulation: world, items, live entities and the orchestrator.
pub struct Harness {
    pub world: Arc<VoxelWorld>,
    pub items: Arc<ItemCatalog>,
    pub host: InMemoryItems,
    pub orchestrator: DeathOrchestrator,
    pub now: Tick,
}

impl Harness {
    pub fn new(layout: &WorldLayout, config: DeathConfig) -> Self {
        Self::with(layout, config, |builder| builder)
    }

    pub fn with(
        layout: &WorldLayout,
        config: DeathConfig,
        customize: impl FnOnce(OrchestratorBuilder) -> OrchestratorBuilder,
    ) -> Self {
        let world = Arc::new(VoxelWorld::from_layout(layout));
        let items = Arc::new(catalog());
        let oracles = OracleManager::new(
            Arc::clone(&world) as Arc<dyn WorldOracle>,
            Arc::clone(&items) as Arc<dyn ItemOracle>,
        );
        let builder = DeathOrchestrator::builder()
            .oracles(oracles)
            .config(config)
            .world_seed(layout.seed);
        let orchestrator = customize(builder).build().expect("orchestrator");
        Self {
            world,
            items,
            host: InMemoryItems::new(),
            orchestrator,
            now: Tick::ZERO,
        }
    }

    pub fn stack(&self, name: &str, count: u16) -> ItemStack {
        self.items.stack(name, count).expect("registered item")
    }

    /// Walks `actor` over the given standing blocks, one safe-position
    /// sample each.
    pub fn walk(&mut self, actor: ActorId, path: &[BlockPos]) {
        for &pos in path {
            self.now = Tick(self.now.0.next_multiple_of(10));
            self.orchestrator.on_actor_tick(&ActorTick {
                actor,
                now: self.now,
                position: GlobalPos::new(OVERWORLD, pos),
                on_ground: true,
                spectator: false,
            });
            self.now = self.now + 1;
        }
    }

    /// Kills `actor` at `position`, spawning one entity per occupied slot.
    pub fn die(
        &mut self,
        actor: ActorId,
        position: Vec3,
        inventory: &mut SlotInventory,
    ) -> (DropReport, Vec<EntityId>) {
        let death = DeathContext {
            actor,
            dimension: OVERWORLD,
            position,
            luck: 0.0,
            now: self.now,
        };
        self.orchestrator.on_death(&death, &*inventory);

        let mut drops: Vec<EntityId> = inventory
            .occupied()
            .map(|(_, stack)| self.host.spawn(ItemEntity::new(OVERWORLD, position, stack)))
            .collect();
        inventory.clear();

        let report = self.orchestrator.on_drops(&death, &mut drops, &mut self.host);
        (report, drops)
    }

    /// One host tick: physics first, then the recovery scan.
    pub fn tick(&mut self) -> TickReport {
        for lost in self.host.step(&self.world) {
            self.orchestrator.forget_item(lost);
        }
        let report = self.orchestrator.tick(self.now, &mut self.host);
        self.now = self.now + 1;
        report
    }

    /// Ticks until an item gets recovered, up to `limit` ticks.
    pub fn tick_until_recovered(&mut self, limit: usize) -> Option<TickReport> {
        (0..limit).map(|_| self.tick()).find(|report| report.recovered > 0)
    }
}

pub fn inventory_with(entries: &[(usize, ItemStack)]) -> SlotInventory {
    let mut inventory = SlotInventory::new(SLOTS);
    for &(slot, stack) in entries {
        inventory.set(slot, Some(stack));
    }
    inventory
}
