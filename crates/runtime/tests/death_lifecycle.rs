//! Death, respawn and pickup driven through the public orchestrator API.

mod common;

use std::sync::Arc;

use common::*;
use lenient_core::{
    ActorId, BlockPos, DeathConfig, GlobalPos, InventoryAccess, SlotInventory, Tick, Vec3,
};
use lenient_runtime::{ActorTick, ItemEntities, ItemEntity, PickupOutcome};

fn on_island() -> Vec3 {
    Vec3::new(0.5, 65.0, 0.5)
}

#[test]
fn kept_items_return_to_their_original_slots() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let mut inventory = inventory_with(&[
        (0, h.stack("diamond_sword", 1)),
        (5, h.stack("iron_helmet", 1)),
        (9, h.stack("dirt", 10)),
    ]);

    let (report, drops) = h.die(ALEX, on_island(), &mut inventory);
    assert_eq!(report.kept_stacks, 2);
    assert_eq!(report.dropped, 1);
    assert_eq!(drops.len(), 1);
    assert_eq!(h.host.len(), 1);

    let mut respawned = SlotInventory::new(SLOTS);
    let back = h.orchestrator.on_respawn(ALEX, ALEX, &mut respawned);
    assert_eq!(back.restored_to_slot, 2);
    assert!(back.spilled.is_empty());
    assert_eq!(respawned.get(0), Some(h.stack("diamond_sword", 1)));
    assert_eq!(respawned.get(5), Some(h.stack("iron_helmet", 1)));
    assert_eq!(respawned.occupied().count(), 2);
}

#[test]
fn occupied_slot_falls_back_to_generic_insert() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let mut inventory = inventory_with(&[
        (0, h.stack("diamond_sword", 1)),
        (5, h.stack("iron_helmet", 1)),
    ]);
    h.die(ALEX, on_island(), &mut inventory);

    let mut respawned = inventory_with(&[(0, h.stack("bread", 3))]);
    let back = h.orchestrator.on_respawn(ALEX, ALEX, &mut respawned);

    assert_eq!(back.restored_to_slot, 1);
    assert_eq!(back.inserted, 1);
    assert_eq!(respawned.get(0), Some(h.stack("bread", 3)));
    assert_eq!(respawned.get(1), Some(h.stack("diamond_sword", 1)));
    assert_eq!(respawned.get(5), Some(h.stack("iron_helmet", 1)));
}

#[test]
fn items_that_do_not_fit_are_spilled_not_lost() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let mut inventory = inventory_with(&[
        (0, h.stack("diamond_sword", 1)),
        (5, h.stack("iron_helmet", 1)),
    ]);
    h.die(ALEX, on_island(), &mut inventory);

    let mut tiny = SlotInventory::new(1);
    tiny.set(0, Some(h.stack("bread", 3)));
    let back = h.orchestrator.on_respawn(ALEX, ALEX, &mut tiny);

    assert_eq!(back.restored_to_slot, 0);
    assert_eq!(back.inserted, 0);
    assert_eq!(
        back.spilled,
        vec![h.stack("diamond_sword", 1), h.stack("iron_helmet", 1)]
    );
}

#[test]
fn disabling_slot_restore_still_returns_kept_items() {
    let mut config = DeathConfig::default();
    config.restore_slots = false;
    let mut h = Harness::new(&island(), config);
    let mut inventory = inventory_with(&[(7, h.stack("diamond_sword", 1))]);
    h.die(ALEX, on_island(), &mut inventory);

    let mut respawned = SlotInventory::new(SLOTS);
    let back = h.orchestrator.on_respawn(ALEX, ALEX, &mut respawned);
    assert_eq!(back.inserted, 1);
    assert_eq!(respawned.get(0), Some(h.stack("diamond_sword", 1)));
    assert_eq!(respawned.get(7), None);
}

#[test]
fn marker_beats_the_manual_drop_list() {
    let mut config = DeathConfig::default();
    config.marker.enabled = true;
    config.lists.always_dropped_items = vec!["diamond_sword".to_owned()];
    let mut h = Harness::new(&island(), config);

    let soulbound = h.stack("diamond_sword", 1).with_data(SOULBOUND);
    let plain = h.stack("diamond_sword", 1);
    let mut inventory = inventory_with(&[(0, soulbound), (1, plain)]);

    let (report, drops) = h.die(ALEX, on_island(), &mut inventory);
    assert_eq!(report.kept_stacks, 1);
    assert_eq!(report.dropped, 1);
    let left = h.host.view(drops[0]).map(|view| view.stack);
    assert_eq!(left, Some(plain));

    let mut respawned = SlotInventory::new(SLOTS);
    h.orchestrator.on_respawn(ALEX, ALEX, &mut respawned);
    assert_eq!(respawned.get(0), Some(soulbound));
}

#[test]
fn partial_keeps_split_the_stack_without_losing_units() {
    let mut config = DeathConfig::default();
    config.randomizer.enabled = true;
    config.randomizer.chance_percent = 50;
    let mut h = Harness::new(&island(), config);
    let mut inventory = inventory_with(&[(2, h.stack("dirt", 64))]);

    let (report, drops) = h.die(ALEX, on_island(), &mut inventory);
    let on_ground: u32 = drops
        .iter()
        .filter_map(|id| h.host.view(*id))
        .map(|view| u32::from(view.stack.count))
        .sum();
    assert_eq!(report.kept_units + on_ground, 64);
    assert_eq!(report.kept_stacks, usize::from(report.kept_units > 0));
    assert_eq!(report.dropped, usize::from(on_ground > 0));
}

#[test]
fn preservation_disabled_drops_everything() {
    let mut config = DeathConfig::default();
    config.preservation.enabled = false;
    let mut h = Harness::new(&island(), config);
    let mut inventory = inventory_with(&[
        (0, h.stack("diamond_sword", 1)),
        (1, h.stack("totem_of_undying", 1)),
    ]);

    let (report, _) = h.die(ALEX, on_island(), &mut inventory);
    assert_eq!(report.kept_stacks, 0);
    assert_eq!(report.dropped, 2);
}

#[test]
fn death_drops_are_marked_and_made_resilient() {
    let marker = Arc::new(RecordingMarker::default());
    let mut h = Harness::with(&island(), DeathConfig::default(), |b| {
        b.owner_marker(marker.clone())
    });
    assert!(h.orchestrator.stats().owner_marker_available);

    let mut inventory = inventory_with(&[(2, h.stack("dirt", 5)), (3, h.stack("dirt", 7))]);
    let (_, drops) = h.die(ALEX, on_island(), &mut inventory);

    let marked = marker.marked.lock().unwrap().clone();
    assert_eq!(marked, drops.iter().map(|id| (*id, ALEX)).collect::<Vec<_>>());
    assert!(drops.iter().all(|id| h.host.get(*id).is_some_and(|e| e.resilient)));
}

#[test]
fn missing_owner_marker_is_reported_in_stats() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    assert!(!h.orchestrator.stats().owner_marker_available);

    // drops still go through without the capability
    let mut inventory = inventory_with(&[(2, h.stack("dirt", 5))]);
    let (report, _) = h.die(ALEX, on_island(), &mut inventory);
    assert_eq!(report.dropped, 1);
}

#[test]
fn death_coordinates_are_delivered_once() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut h = Harness::with(&island(), DeathConfig::default(), |b| {
        b.notifier(notifier.clone())
    });
    let mut inventory = SlotInventory::new(SLOTS);
    h.die(ALEX, Vec3::new(10.7, 65.0, -3.2), &mut inventory);

    let died_at = GlobalPos::new(OVERWORLD, BlockPos::new(10, 65, -4));
    let first = h.orchestrator.on_respawn(ALEX, ALEX, &mut inventory);
    assert_eq!(first.death_position, Some(died_at));

    let second = h.orchestrator.on_respawn(ALEX, ALEX, &mut inventory);
    assert_eq!(second.death_position, None);
    assert_eq!(*notifier.sent.lock().unwrap(), vec![(ALEX, died_at)]);
}

#[test]
fn death_coordinates_respect_the_feature_switch() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut config = DeathConfig::default();
    config.features.death_coordinates = false;
    let mut h = Harness::with(&island(), config, |b| b.notifier(notifier.clone()));

    let mut inventory = SlotInventory::new(SLOTS);
    h.die(ALEX, on_island(), &mut inventory);
    let back = h.orchestrator.on_respawn(ALEX, ALEX, &mut inventory);

    assert_eq!(back.death_position, None);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[test]
fn respawn_under_a_new_id_carries_state_over() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut h = Harness::with(&island(), DeathConfig::default(), |b| {
        b.notifier(notifier.clone())
    });
    h.walk(ALEX, &[BlockPos::new(0, 65, 0), BlockPos::new(4, 65, 4)]);
    let mut inventory = inventory_with(&[(0, h.stack("diamond_sword", 1))]);
    h.die(ALEX, on_island(), &mut inventory);

    let reborn = ActorId(2);
    let mut respawned = SlotInventory::new(SLOTS);
    let back = h.orchestrator.on_respawn(ALEX, reborn, &mut respawned);

    let last = GlobalPos::new(OVERWORLD, BlockPos::new(4, 65, 4));
    assert_eq!(back.carried_safe_pos, Some(last));
    assert_eq!(respawned.get(0), Some(h.stack("diamond_sword", 1)));
    assert_eq!(notifier.sent.lock().unwrap()[0].0, reborn);

    let stats = h.orchestrator.stats().sessions;
    assert_eq!(stats.sessions, 1);
    assert_eq!(stats.with_kept_items, 0);
}

#[test]
fn disconnect_discards_session_state() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    h.orchestrator.on_connect(ALEX);
    h.walk(ALEX, &[BlockPos::new(0, 65, 0)]);
    let mut inventory = inventory_with(&[(0, h.stack("diamond_sword", 1))]);
    h.die(ALEX, on_island(), &mut inventory);

    let before = h.orchestrator.stats().sessions;
    assert_eq!(before.sessions, 1);
    assert_eq!(before.with_kept_items, 1);
    assert_eq!(before.with_pending_death_pos, 1);
    assert_eq!(before.with_history, 1);

    h.orchestrator.on_disconnect(ALEX);
    assert_eq!(h.orchestrator.stats().sessions.sessions, 0);

    // nothing comes back after a disconnect
    let mut respawned = SlotInventory::new(SLOTS);
    let back = h.orchestrator.on_respawn(ALEX, ALEX, &mut respawned);
    assert_eq!(respawned.occupied().count(), 0);
    assert_eq!(back.death_position, None);
}

#[test]
fn samples_after_a_disconnect_do_not_reopen_the_session() {
    let h = Harness::new(&island(), DeathConfig::default());
    h.orchestrator.on_connect(ALEX);
    h.orchestrator.on_disconnect(ALEX);

    h.orchestrator.on_actor_tick(&ActorTick {
        actor: ALEX,
        now: Tick(10),
        position: GlobalPos::new(OVERWORLD, BlockPos::new(0, 65, 0)),
        on_ground: true,
        spectator: false,
    });

    let stats = h.orchestrator.stats().sessions;
    assert_eq!(stats.sessions, 0);
    assert_eq!(stats.with_history, 0);
}

#[test]
fn drops_follow_their_owner_to_a_new_id() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    h.walk(ALEX, &[BlockPos::new(0, 65, 0)]);
    let mut inventory = inventory_with(&[(3, h.stack("dirt", 16))]);
    let (_, drops) = h.die(ALEX, Vec3::new(20.5, 70.0, 0.5), &mut inventory);

    let reborn = ActorId(2);
    let mut respawned = SlotInventory::new(SLOTS);
    h.orchestrator.on_respawn(ALEX, reborn, &mut respawned);
    // the new instance finds a spot closer to where the drop went down
    h.walk(reborn, &[BlockPos::new(8, 65, 0)]);

    h.tick_until_recovered(400).expect("dirt is recovered");
    let position = h.host.get(drops[0]).map(|e| e.position);
    assert_eq!(position, Some(Vec3::new(8.5, 65.0, 0.5)));
}

#[test]
fn airborne_and_spectating_actors_are_not_sampled() {
    let h = Harness::new(&island(), DeathConfig::default());
    let sample = |on_ground, spectator, now| ActorTick {
        actor: ALEX,
        now: Tick(now),
        position: GlobalPos::new(OVERWORLD, BlockPos::new(1, 65, 1)),
        on_ground,
        spectator,
    };
    h.orchestrator.on_actor_tick(&sample(false, false, 10));
    h.orchestrator.on_actor_tick(&sample(true, true, 20));
    h.orchestrator.on_actor_tick(&sample(true, false, 25));
    assert_eq!(h.orchestrator.stats().sessions.with_history, 0);

    h.orchestrator.on_actor_tick(&sample(true, false, 30));
    assert_eq!(h.orchestrator.stats().sessions.with_history, 1);
}

#[test]
fn pickup_restores_the_original_slot() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let mut inventory = inventory_with(&[(9, h.stack("dirt", 10))]);
    let (_, drops) = h.die(ALEX, on_island(), &mut inventory);
    let dirt = drops[0];

    let mut respawned = SlotInventory::new(SLOTS);
    let outcome = h.orchestrator.on_item_pickup(dirt, &mut respawned, &mut h.host);

    assert_eq!(
        outcome,
        PickupOutcome {
            moved: 10,
            cancel_default: true
        }
    );
    assert_eq!(respawned.get(9), Some(h.stack("dirt", 10)));
    assert!(h.host.get(dirt).is_none());
}

#[test]
fn partial_pickup_leaves_the_remainder_on_the_ground() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let mut inventory = inventory_with(&[(9, h.stack("dirt", 10))]);
    let (_, drops) = h.die(ALEX, on_island(), &mut inventory);
    let dirt = drops[0];

    let mut respawned = inventory_with(&[(9, h.stack("dirt", 60))]);
    let outcome = h.orchestrator.on_item_pickup(dirt, &mut respawned, &mut h.host);

    assert_eq!(outcome.moved, 4);
    assert!(outcome.cancel_default);
    assert_eq!(respawned.get(9).map(|s| s.count), Some(64));
    assert_eq!(h.host.get(dirt).map(|e| e.stack.count), Some(6));
}

#[test]
fn pickup_of_ordinary_items_uses_the_default_path() {
    let mut h = Harness::new(&island(), DeathConfig::default());
    let stray = h
        .host
        .spawn(ItemEntity::new(OVERWORLD, on_island(), h.stack("bread", 2)));

    let mut inventory = SlotInventory::new(SLOTS);
    let outcome = h.orchestrator.on_item_pickup(stray, &mut inventory, &mut h.host);
    assert_eq!(outcome, PickupOutcome::default());
    assert!(h.host.get(stray).is_some());
}
