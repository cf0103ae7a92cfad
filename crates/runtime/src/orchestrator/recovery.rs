//! Per-tick void and hazard recovery.

use lenient_core::{
    DeathConfig, DroppedItemState, EntityId, RateLimitPolicy, RecoveryConfig, RecoveryRequest,
    RecoveryScope, RecoveryTarget, RecoveryTrigger, Tick, WorldOracle, resolve,
};

use super::{DeathOrchestrator, skip_on_error};
use crate::host::{ItemEntities, ItemEntityView, Teleport};

/// Outcome of one [`DeathOrchestrator::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub scanned: usize,
    pub recovered: usize,
    /// Triggered items the limiter held back.
    pub rate_limited: usize,
}

impl DeathOrchestrator {
    /// Scans every live item and moves the ones falling into the void or
    /// burning back to safety.
    pub fn tick(&self, now: Tick, entities: &mut dyn ItemEntities) -> TickReport {
        let mut report = TickReport::default();
        let Some(snapshot) = self.config() else {
            return report;
        };
        let recovery = &snapshot.config.recovery;
        if !recovery.any_enabled() {
            return report;
        }
        let policy = RateLimitPolicy::from(recovery);
        let world = self.oracles.world();

        for entity in entities.live_items() {
            let Some(view) = entities.view(entity) else {
                continue;
            };
            report.scanned += 1;

            let Some(tracked) = skip_on_error("tick", self.drops.get(entity)) else {
                continue;
            };
            let mut state = tracked.unwrap_or_default();
            if recovery.scope == RecoveryScope::DeathDropsOnly && !state.is_death_drop {
                if self.recovery_debug() {
                    tracing::info!(
                        target: "lenient::recovery",
                        entity = entity.0,
                        reason = "not_death_drop",
                        pos = %view.position,
                        "skip item"
                    );
                }
                continue;
            }
            if state.recently_recovered(now, DeathConfig::RECOVERY_DEBOUNCE_TICKS) {
                continue;
            }
            let Some(trigger) = detect_trigger(world, recovery, &view) else {
                continue;
            };

            if !state.rate_limit.allow(&policy, now) {
                report.rate_limited += 1;
                recovery_log!(
                    self,
                    entity = entity.0,
                    trigger = %trigger,
                    reason = "limiter_blocked",
                    "skip item"
                );
                continue;
            }

            if self
                .recover_item(entity, &mut state, trigger, now, entities)
                .is_some()
            {
                report.recovered += 1;
            }
            self.store_item_state("tick", entity, state, tracked.is_some(), &*entities);
        }
        report
    }

    /// Writes recovered state back without resurrecting an entry the host
    /// forgot meanwhile. Untracked items only get an entry while still live.
    pub(super) fn store_item_state(
        &self,
        hook: &'static str,
        entity: EntityId,
        state: DroppedItemState,
        tracked: bool,
        entities: &dyn ItemEntities,
    ) {
        if tracked {
            skip_on_error(hook, self.drops.replace_existing(entity, state));
        } else if entities.view(entity).is_some() {
            skip_on_error(hook, self.drops.insert(entity, state));
        }
    }

    /// Resolves a destination and teleports the item there.
    ///
    /// The owner's history is copied out of the session store first, so no
    /// lock is held during the world search.
    pub(super) fn recover_item(
        &self,
        entity: EntityId,
        state: &mut DroppedItemState,
        trigger: RecoveryTrigger,
        now: Tick,
        entities: &mut dyn ItemEntities,
    ) -> Option<RecoveryTarget> {
        let view = entities.view(entity)?;
        let history = state
            .owner
            .and_then(|owner| skip_on_error("recover_item", self.sessions.history(owner)))
            .flatten();

        let request = RecoveryRequest {
            dimension: view.dimension,
            body: view.body(),
            owner_history: history.as_ref(),
            stored_safe_pos: state.safe_recovery_pos,
        };
        let target = resolve(self.oracles.world(), &request);

        entities.teleport(
            entity,
            &Teleport {
                position: target.pos.bottom_center(),
                pickup_delay: DeathConfig::RECOVERY_PICKUP_DELAY,
                clear_fire: trigger.clears_fire(),
            },
        );
        state.last_recovered = Some(now);

        recovery_log!(
            self,
            entity = entity.0,
            trigger = %trigger,
            source = %target.source,
            from = %view.position,
            to = %target.pos,
            "item recovered"
        );
        Some(target)
    }
}

/// Void wins over hazards; lava wins over fire.
fn detect_trigger(
    world: &dyn WorldOracle,
    recovery: &RecoveryConfig,
    view: &ItemEntityView,
) -> Option<RecoveryTrigger> {
    if recovery.void_enabled {
        let trigger_y = world.void_trigger_y(view.dimension);
        if view.position.y <= trigger_y || view.next_y() <= trigger_y {
            return Some(RecoveryTrigger::Void);
        }
    }
    if recovery.hazard_enabled {
        if view.in_lava {
            return Some(RecoveryTrigger::Lava);
        }
        if view.on_fire {
            return Some(RecoveryTrigger::Fire);
        }
    }
    None
}
