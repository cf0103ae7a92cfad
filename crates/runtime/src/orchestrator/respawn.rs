//! Respawn and pickup hooks.

use lenient_core::{ActorId, EntityId, GlobalPos, InventoryAccess, ItemStack, insert_into_slot};

use super::{DeathOrchestrator, skip_on_error};
use crate::host::ItemEntities;

/// Outcome of [`DeathOrchestrator::on_respawn`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RespawnReport {
    /// Kept stacks placed entirely into their original slot.
    pub restored_to_slot: usize,
    /// Kept stacks (or remainders) placed by generic insertion.
    pub inserted: usize,
    /// Stacks that did not fit; the host drops these at the actor's feet.
    pub spilled: Vec<ItemStack>,
    /// Death position delivered to the notifier.
    pub death_position: Option<GlobalPos>,
    /// Last safe position of the previous actor instance. Under a new id
    /// the whole history and the ownership of live death drops move over.
    pub carried_safe_pos: Option<GlobalPos>,
}

/// Outcome of [`DeathOrchestrator::on_item_pickup`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickupOutcome {
    /// Units moved straight into the original slot.
    pub moved: u16,
    /// The host must not run its default pickup for this item this tick.
    pub cancel_default: bool,
}

impl DeathOrchestrator {
    /// Hands kept items back to the respawned actor.
    ///
    /// `old` is the id of the instance that died, `new` the respawned one;
    /// hosts whose ids survive death pass the same id twice.
    pub fn on_respawn(
        &self,
        old: ActorId,
        new: ActorId,
        inventory: &mut dyn InventoryAccess,
    ) -> RespawnReport {
        let mut report = RespawnReport::default();
        let Some(snapshot) = self.config() else {
            return report;
        };
        let config = &snapshot.config;

        let pending = skip_on_error("on_respawn", self.sessions.take_death_position(old)).flatten();
        if let Some(pos) = pending.filter(|_| config.features.death_coordinates) {
            match &self.notifier {
                Some(notifier) => notifier.death_coordinates(new, pos),
                None => tracing::info!(
                    target: "lenient::respawn",
                    actor = new.0,
                    x = pos.pos.x,
                    y = pos.pos.y,
                    z = pos.pos.z,
                    dimension = %pos.dimension,
                    "death coordinates"
                ),
            }
            report.death_position = Some(pos);
        }

        let items = self.oracles.items();
        let kept = skip_on_error("on_respawn", self.sessions.take_kept(old)).unwrap_or_default();
        for record in kept {
            let mut stack = Some(record.stack);

            let slot = record
                .original_slot
                .filter(|slot| config.restore_slots && *slot < inventory.slot_count());
            if let Some(slot) = slot {
                stack = insert_into_slot(inventory, items, slot, record.stack);
                if stack.is_none() {
                    report.restored_to_slot += 1;
                }
            }

            if let Some(rest) = stack {
                match inventory.insert(items, rest) {
                    None => report.inserted += 1,
                    Some(left) => report.spilled.push(left),
                }
            }
        }

        report.carried_safe_pos = if old == new {
            skip_on_error("on_respawn", self.sessions.last_safe_position(old)).flatten()
        } else {
            let carried = skip_on_error("on_respawn", self.sessions.transfer(old, new)).flatten();
            if let Some(moved) = skip_on_error("on_respawn", self.drops.transfer_owner(old, new)) {
                tracing::debug!(
                    target: "lenient::respawn",
                    old = old.0,
                    new = new.0,
                    drops = moved,
                    "death drops re-owned"
                );
            }
            carried
        };

        tracing::info!(
            target: "lenient::respawn",
            actor = new.0,
            restored = report.restored_to_slot,
            inserted = report.inserted,
            spilled = report.spilled.len(),
            "kept items returned"
        );
        report
    }

    /// Moves a picked-up death drop straight into its original slot.
    ///
    /// Returns how many units were moved. When anything moved the entity
    /// has already been shrunk (or discarded) and the host must cancel its
    /// default pickup.
    pub fn on_item_pickup(
        &self,
        entity: EntityId,
        inventory: &mut dyn InventoryAccess,
        entities: &mut dyn ItemEntities,
    ) -> PickupOutcome {
        let outcome = PickupOutcome::default();
        let Some(snapshot) = self.config() else {
            return outcome;
        };
        if !snapshot.config.restore_slots {
            return outcome;
        }

        let Some(slot) = skip_on_error("on_item_pickup", self.drops.get(entity))
            .flatten()
            .and_then(|state| state.original_slot)
            .filter(|slot| *slot < inventory.slot_count())
        else {
            return outcome;
        };
        let Some(stack) = entities.view(entity).map(|view| view.stack) else {
            return outcome;
        };
        if stack.is_empty() {
            return outcome;
        }

        let remaining = insert_into_slot(inventory, self.oracles.items(), slot, stack);
        let moved = stack.count - remaining.map_or(0, |rest| rest.count);
        if moved == 0 {
            return outcome;
        }

        match remaining {
            Some(rest) => entities.set_stack(entity, rest),
            None => {
                entities.discard(entity);
                skip_on_error("on_item_pickup", self.drops.remove(entity));
            }
        }
        tracing::debug!(
            target: "lenient::respawn",
            entity = entity.0,
            slot,
            moved,
            "pickup restored to original slot"
        );
        PickupOutcome {
            moved,
            cancel_default: true,
        }
    }
}
