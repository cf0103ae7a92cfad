//! Void and hazard recovery across host physics ticks.

mod common;

use common::*;
use lenient_content::{BlockKind, WorldLayout};
use lenient_core::{BlockPos, DeathConfig, EntityId, ItemStack, RecoveryScope, Tick, Vec3};
use lenient_runtime::{
    DeathContext, DeathOrchestrator, InMemoryItems, ItemEntities, ItemEntity, ItemEntityView,
    Teleport, TickReport,
};

fn all_drops() -> DeathConfig {
    let mut config = DeathConfig::default();
    config.recovery.scope = RecoveryScope::AllDrops;
    config
}

/// Host whose teleport despawns the item and tells the orchestrator, as a
/// host racing its own cleanup against a recovery would.
struct DespawnOnTeleport<'a> {
    items: &'a mut InMemoryItems,
    orchestrator: &'a DeathOrchestrator,
}

impl ItemEntities for DespawnOnTeleport<'_> {
    fn live_items(&self) -> Vec<EntityId> {
        self.items.live_items()
    }

    fn view(&self, entity: EntityId) -> Option<ItemEntityView> {
        self.items.view(entity)
    }

    fn set_stack(&mut self, entity: EntityId, stack: ItemStack) {
        self.items.set_stack(entity, stack);
    }

    fn discard(&mut self, entity: EntityId) {
        self.items.discard(entity);
    }

    fn make_resilient(&mut self, entity: EntityId) {
        self.items.make_resilient(entity);
    }

    fn teleport(&mut self, entity: EntityId, _teleport: &Teleport) {
        self.items.discard(entity);
        self.orchestrator.forget_item(entity);
    }
}

fn with_lava(mut layout: WorldLayout, pos: BlockPos) -> WorldLayout {
    let dim = layout.dimensions.remove(0).with_block(pos, BlockKind::Lava);
    layout.dimensions.insert(0, dim);
    layout
}

#[test]
fn void_fall_returns_to_the_owner_history() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    h.walk(ALEX, &[BlockPos::new(0, 65, 0), BlockPos::new(5, 65, 5)]);

    // off the edge of the island
    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (_, drops) = h.die(ALEX, Vec3::new(20.5, 70.0, 0.5), &mut inventory);
    let dirt = drops[0];

    let report = h.tick_until_recovered(400).expect("dirt is recovered");
    assert_eq!(report.recovered, 1);

    let entity = h.host.get(dirt).copied().expect("still alive");
    assert_eq!(entity.position, Vec3::new(5.5, 65.0, 5.5));
    assert_eq!(entity.pickup_delay, DeathConfig::RECOVERY_PICKUP_DELAY);

    // it stays put on the island afterwards
    for _ in 0..40 {
        h.tick();
    }
    let settled = h.host.get(dirt).map(|e| e.position);
    assert_eq!(settled, Some(Vec3::new(5.5, 65.0, 5.5)));
}

#[test]
fn ordinary_drops_are_left_alone_by_default() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let stray = h.host.spawn(ItemEntity::new(
        OVERWORLD,
        Vec3::new(20.5, 70.0, 0.5),
        h.stack("bread", 1),
    ));

    assert_eq!(h.tick_until_recovered(400), None);
    assert!(h.host.get(stray).is_none());
}

#[test]
fn all_drops_scope_recovers_ordinary_items_near_spawn() {
    let mut h = Harness::new(&island(), all_drops());
    let stray = h.host.spawn(ItemEntity::new(
        OVERWORLD,
        Vec3::new(20.5, 70.0, 0.5),
        h.stack("bread", 1),
    ));

    h.tick_until_recovered(400).expect("bread is recovered");
    let position = h.host.get(stray).map(|e| e.position);
    assert_eq!(position, Some(Vec3::new(0.5, 65.0, 0.5)));
}

#[test]
fn near_void_deaths_recover_immediately() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    h.walk(ALEX, &[BlockPos::new(0, 65, 0)]);

    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (report, drops) = h.die(ALEX, Vec3::new(0.5, -60.0, 0.5), &mut inventory);

    assert_eq!(report.immediate_recoveries, 1);
    let position = h.host.get(drops[0]).map(|e| e.position);
    assert_eq!(position, Some(Vec3::new(0.5, 65.0, 0.5)));
}

#[test]
fn near_void_pass_is_skipped_when_void_recovery_is_off() {
    let mut config = DeathConfig::default();
    config.recovery.void_enabled = false;
    let mut h = Harness::new(&island(), config);

    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (report, drops) = h.die(ALEX, Vec3::new(0.5, -60.0, 0.5), &mut inventory);

    assert_eq!(report.immediate_recoveries, 0);
    let position = h.host.get(drops[0]).map(|e| e.position);
    assert_eq!(position, Some(Vec3::new(0.5, -60.0, 0.5)));
}

#[test]
fn burning_items_are_pulled_out_of_lava_and_extinguished() {
    let layout = with_lava(island(), BlockPos::new(3, 65, 3));
    let mut h = Harness::new(&layout, DeathConfig::default());
    h.walk(ALEX, &[BlockPos::new(0, 65, 0)]);

    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (_, drops) = h.die(ALEX, Vec3::new(3.5, 65.0, 3.5), &mut inventory);

    let report = h.tick();
    assert_eq!(report.recovered, 1);
    let entity = h.host.get(drops[0]).copied().expect("still alive");
    assert_eq!(entity.position, Vec3::new(0.5, 65.0, 0.5));
    assert!(!entity.on_fire);
    assert!(!entity.in_lava);
}

#[test]
fn hazard_switch_leaves_lava_alone() {
    let layout = with_lava(island(), BlockPos::new(3, 65, 3));
    let mut config = DeathConfig::default();
    config.recovery.hazard_enabled = false;
    let mut h = Harness::new(&layout, config);

    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (_, drops) = h.die(ALEX, Vec3::new(3.5, 65.0, 3.5), &mut inventory);

    assert_eq!(h.tick().recovered, 0);
    // resilient death drops burn forever without being destroyed
    let entity = h.host.get(drops[0]).copied().expect("resilient");
    assert!(entity.in_lava);
}

#[test]
fn empty_world_falls_back_to_the_spawn_column() {
    let mut h = Harness::new(&nothing(), all_drops());
    let stray = h.host.spawn(ItemEntity::new(
        OVERWORLD,
        Vec3::new(0.5, -100.0, 0.5),
        h.stack("bread", 1),
    ));

    let report = h.orchestrator.tick(Tick(0), &mut h.host);
    assert_eq!(report.recovered, 1);
    let position = h.host.get(stray).map(|e| e.position);
    assert_eq!(position, Some(Vec3::new(0.5, 63.0, 0.5)));
}

#[test]
fn limiter_caps_repeated_recoveries_then_cools_down() {
    let mut h = Harness::new(&nothing(), all_drops());
    let stuck = h.host.spawn(ItemEntity::new(
        OVERWORLD,
        Vec3::new(0.5, -100.0, 0.5),
        h.stack("bread", 1),
    ));

    let mut recovered_at = Vec::new();
    let mut limited = 0;
    for now in 0..=14 {
        if let Some(entity) = h.host.get_mut(stuck) {
            entity.position = Vec3::new(0.5, -100.0, 0.5);
        }
        let report = h.orchestrator.tick(Tick(now), &mut h.host);
        if report.recovered > 0 {
            recovered_at.push(now);
        }
        limited += report.rate_limited;
    }

    // odd ticks fall inside the post-recovery debounce
    assert_eq!(recovered_at, vec![0, 2, 4, 14]);
    assert_eq!(limited, 8);
}

#[test]
fn reload_switching_recovery_off_takes_effect_next_tick() {
    let mut h = Harness::new(&nothing(), all_drops());
    let stray = h.host.spawn(ItemEntity::new(
        OVERWORLD,
        Vec3::new(0.5, -100.0, 0.5),
        h.stack("bread", 1),
    ));

    let mut off = all_drops();
    off.recovery.void_enabled = false;
    off.recovery.hazard_enabled = false;
    h.orchestrator.reload_config(off).expect("reloaded");

    let report = h.orchestrator.tick(Tick(0), &mut h.host);
    assert_eq!(report, TickReport::default());
    let position = h.host.get(stray).map(|e| e.position);
    assert_eq!(position, Some(Vec3::new(0.5, -100.0, 0.5)));
}

#[test]
fn lost_items_are_forgotten() {
    let mut h = Harness::new(&nothing(), DeathConfig::default());
    let mut config = DeathConfig::default();
    config.recovery.void_enabled = false;
    h.orchestrator.reload_config(config).expect("reloaded");

    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (_, drops) = h.die(ALEX, Vec3::new(0.5, 70.0, 0.5), &mut inventory);
    assert_eq!(h.orchestrator.stats().tracked_items, 1);

    for _ in 0..400 {
        h.tick();
    }
    assert!(h.host.get(drops[0]).is_none());
    assert_eq!(h.orchestrator.stats().tracked_items, 0);
}

#[test]
fn items_forgotten_during_recovery_stay_forgotten() {
    let mut h = Harness::new(&nothing(), DeathConfig::default());
    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (_, drops) = h.die(ALEX, Vec3::new(0.5, 70.0, 0.5), &mut inventory);
    assert_eq!(h.orchestrator.stats().tracked_items, 1);

    if let Some(entity) = h.host.get_mut(drops[0]) {
        entity.position = Vec3::new(0.5, -100.0, 0.5);
    }
    let mut host = DespawnOnTeleport {
        items: &mut h.host,
        orchestrator: &h.orchestrator,
    };
    let report = h.orchestrator.tick(Tick(5), &mut host);

    assert_eq!(report.recovered, 1);
    assert!(h.host.is_empty());
    assert_eq!(h.orchestrator.stats().tracked_items, 0);
}

#[test]
fn immediate_recovery_does_not_track_a_despawned_drop() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let death = DeathContext {
        actor: ALEX,
        dimension: OVERWORLD,
        position: Vec3::new(0.5, -60.0, 0.5),
        luck: 0.0,
        now: Tick(0),
    };
    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    h.orchestrator.on_death(&death, &inventory);

    let dirt = h.host.spawn(ItemEntity::new(
        OVERWORLD,
        death.position,
        h.stack("dirt", 16),
    ));
    inventory.clear();
    let mut drops = vec![dirt];
    let mut host = DespawnOnTeleport {
        items: &mut h.host,
        orchestrator: &h.orchestrator,
    };
    let report = h.orchestrator.on_drops(&death, &mut drops, &mut host);

    assert_eq!(report.immediate_recoveries, 1);
    assert_eq!(report.dropped, 0);
    assert!(drops.is_empty());
    assert_eq!(h.orchestrator.stats().tracked_items, 0);
}
