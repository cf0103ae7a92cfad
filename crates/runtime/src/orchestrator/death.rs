//! Actor ticks, death and drop-spawn hooks.

use lenient_core::{
    ActorId, BlockPos, DeathConfig, DimensionId, DroppedItemState, EntityId, GlobalPos,
    InventoryAccess, InventorySnapshot, KeepContext, RecoveryTrigger, RollSeed, Tick, Vec3,
    WorldOracle, keep_count,
};

use super::{DeathOrchestrator, skip_on_error};
use crate::host::ItemEntities;
use crate::session::PreservedItemRecord;

/// Per-tick actor sample used to build the safe-position history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorTick {
    pub actor: ActorId,
    pub now: Tick,
    /// Block the actor is standing in.
    pub position: GlobalPos,
    pub on_ground: bool,
    pub spectator: bool,
}

/// The dying actor at the moment of death.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathContext {
    pub actor: ActorId,
    pub dimension: DimensionId,
    pub position: Vec3,
    pub luck: f32,
    pub now: Tick,
}

impl DeathContext {
    pub fn block_pos(&self) -> GlobalPos {
        GlobalPos::new(self.dimension, BlockPos::containing(self.position))
    }
}

/// Outcome of [`DeathOrchestrator::on_drops`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropReport {
    /// Stacks (whole or partial) moved into the kept list.
    pub kept_stacks: usize,
    pub kept_units: u32,
    /// Entities left in the world as death drops.
    pub dropped: usize,
    pub immediate_recoveries: usize,
}

impl DeathOrchestrator {
    /// Samples a safe standing position every
    /// [`DeathConfig::SAFE_POS_UPDATE_TICKS`] ticks while the actor is on
    /// the ground.
    pub fn on_actor_tick(&self, sample: &ActorTick) {
        if sample.now.0 % DeathConfig::SAFE_POS_UPDATE_TICKS != 0
            || !sample.on_ground
            || sample.spectator
        {
            return;
        }
        let recorded = skip_on_error(
            "on_actor_tick",
            self.sessions
                .record_safe_position(sample.actor, sample.position),
        );
        if recorded == Some(true) {
            tracing::trace!(
                target: "lenient::session",
                actor = sample.actor.0,
                pos = %sample.position,
                "safe position recorded"
            );
        }
    }

    /// Stashes the death position and captures the slot layout.
    pub fn on_death(&self, death: &DeathContext, inventory: &dyn InventoryAccess) {
        let Some(snapshot) = self.config() else {
            return;
        };
        let config = &snapshot.config;

        if config.features.death_coordinates {
            skip_on_error(
                "on_death",
                self.sessions
                    .stash_death_position(death.actor, death.block_pos()),
            );
        }

        if config.restore_slots {
            let captured = InventorySnapshot::capture(inventory);
            let slots = captured.len();
            if skip_on_error(
                "on_death",
                self.sessions.store_snapshot(death.actor, captured),
            )
            .is_some()
            {
                tracing::debug!(
                    target: "lenient::death",
                    actor = death.actor.0,
                    slots,
                    "inventory snapshot captured"
                );
            }
        }
    }

    /// Splits the produced drops into kept stacks and world drops.
    ///
    /// Fully kept entities are discarded and removed from `drops`; partially
    /// kept ones shrink to the remainder. Every entity that stays is
    /// registered as a death drop carrying its matched slot and the owner's
    /// best safe point.
    pub fn on_drops(
        &self,
        death: &DeathContext,
        drops: &mut Vec<EntityId>,
        entities: &mut dyn ItemEntities,
    ) -> DropReport {
        let mut report = DropReport::default();
        let Some(snapshot) = self.config() else {
            return report;
        };
        let config = &snapshot.config;
        let env = self.oracles.as_death_env();
        let items = env.items();
        let actor = death.actor;

        let mut slots = skip_on_error("on_drops", self.sessions.take_snapshot(actor))
            .flatten()
            .filter(|_| config.restore_slots);
        let safe_pos = skip_on_error(
            "on_drops",
            self.sessions
                .drop_safe_position(actor, death.dimension, death.block_pos().pos),
        )
        .flatten();
        let near_void = config.recovery.void_enabled
            && env
                .world()
                .is_near_void(death.dimension, death.position.y);

        let mut kept = Vec::new();
        let incoming = std::mem::take(drops);
        for (index, entity) in incoming.into_iter().enumerate() {
            let Some(view) = entities.view(entity) else {
                continue;
            };
            let stack = view.stack;
            let original_slot = slots
                .as_mut()
                .and_then(|slots| slots.take_match(items, &stack));

            let ctx = KeepContext {
                luck: death.luck,
                seed: RollSeed {
                    world_seed: self.world_seed,
                    tick: death.now,
                    actor,
                    drop_index: u32::try_from(index).unwrap_or(u32::MAX),
                },
            };
            let decision = keep_count(&env, config, &snapshot.lists, &ctx, &stack);
            let (kept_part, remainder) = stack.split(decision.keep);

            if let Some(kept_stack) = kept_part {
                kept.push(PreservedItemRecord {
                    stack: kept_stack,
                    original_slot,
                });
                report.kept_stacks += 1;
                report.kept_units += u32::from(kept_stack.count);
            }
            tracing::debug!(
                target: "lenient::death",
                actor = actor.0,
                entity = entity.0,
                count = stack.count,
                keep = decision.keep,
                source = %decision.source,
                slot = ?original_slot,
                "preservation decision"
            );

            let Some(remainder) = remainder else {
                entities.discard(entity);
                continue;
            };
            if kept_part.is_some() {
                entities.set_stack(entity, remainder);
            }

            let mut state = DroppedItemState::death_drop(actor);
            state.original_slot = original_slot;
            state.safe_recovery_pos = safe_pos;

            if config.features.item_resilience {
                entities.make_resilient(entity);
            }
            if config.features.owner_marker {
                self.mark_owner(entity, actor);
            }

            if near_void
                && !state.recently_recovered(death.now, DeathConfig::RECOVERY_DEBOUNCE_TICKS)
                && self
                    .recover_item(
                        entity,
                        &mut state,
                        RecoveryTrigger::NearVoidDeath,
                        death.now,
                        entities,
                    )
                    .is_some()
            {
                report.immediate_recoveries += 1;
            }

            self.store_item_state("on_drops", entity, state, false, &*entities);
            if entities.view(entity).is_none() {
                continue;
            }
            drops.push(entity);
            report.dropped += 1;
        }

        if !kept.is_empty() {
            skip_on_error("on_drops", self.sessions.store_kept(actor, kept));
        }

        tracing::info!(
            target: "lenient::death",
            actor = actor.0,
            kept = report.kept_stacks,
            dropped = report.dropped,
            immediate = report.immediate_recoveries,
            "death drops processed"
        );
        report
    }
}
