//! Death-drop lifecycle orchestration.
//!
//! [`DeathOrchestrator`] is driven by the host through a fixed set of hooks,
//! called in this order within a tick: [`on_death`](DeathOrchestrator::on_death),
//! then [`on_drops`](DeathOrchestrator::on_drops), then
//! [`tick`](DeathOrchestrator::tick). Respawn, pickup and session hooks
//! may arrive from any thread.
//!
//! Every hook reads the live configuration once at its start. No hook
//! returns an error: store failures are logged and the hook is skipped.

/// Logs a recovery decision at `debug`, or `info` while recovery debugging
/// is switched on.
macro_rules! recovery_log {
    ($orchestrator:expr, $($arg:tt)+) => {
        if $orchestrator.recovery_debug() {
            tracing::info!(target: "lenient::recovery", $($arg)+)
        } else {
            tracing::debug!(target: "lenient::recovery", $($arg)+)
        }
    };
}

mod builder;
mod death;
mod recovery;
mod respawn;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lenient_core::{ActorId, Capability, DeathConfig, EntityId, GameError};

use crate::config::{ConfigHandle, ConfigSnapshot};
use crate::drops::DropTable;
use crate::error::Result;
use crate::host::{DeathNotifier, OwnerMarker};
use crate::oracle::OracleManager;
use crate::session::{SessionStats, SessionStore};

pub use builder::OrchestratorBuilder;
pub use death::{ActorTick, DeathContext, DropReport};
pub use recovery::TickReport;
pub use respawn::{PickupOutcome, RespawnReport};

/// Diagnostic counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrchestratorStats {
    pub sessions: SessionStats,
    /// Entries in the dropped-item side-table.
    pub tracked_items: usize,
    pub owner_marker_available: bool,
    pub recovery_debug: bool,
}

/// Owns per-actor sessions and per-item state and runs the death pipeline.
pub struct DeathOrchestrator {
    oracles: OracleManager,
    config: Arc<ConfigHandle>,
    sessions: SessionStore,
    drops: DropTable,
    notifier: Option<Arc<dyn DeathNotifier>>,
    owner_marker: Capability<Arc<dyn OwnerMarker>>,
    world_seed: u64,
    recovery_debug: AtomicBool,
}

impl DeathOrchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Option<Arc<ConfigSnapshot>> {
        skip_on_error("config", self.config.current())
    }

    /// Swaps in a new configuration; the next hook sees it.
    pub fn reload_config(&self, config: DeathConfig) -> Option<Arc<ConfigSnapshot>> {
        skip_on_error(
            "reload_config",
            self.config.reload(config, self.oracles.items()),
        )
    }

    pub fn on_connect(&self, actor: ActorId) {
        if skip_on_error("on_connect", self.sessions.connect(actor)).is_some() {
            tracing::debug!(target: "lenient::session", actor = actor.0, "session opened");
        }
    }

    /// Discards everything remembered about `actor`.
    pub fn on_disconnect(&self, actor: ActorId) {
        if let Some(Some(_)) = skip_on_error("on_disconnect", self.sessions.disconnect(actor)) {
            tracing::debug!(target: "lenient::session", actor = actor.0, "session closed");
        }
    }

    /// Forgets the runtime state of an item the host despawned.
    pub fn forget_item(&self, entity: EntityId) {
        skip_on_error("forget_item", self.drops.remove(entity));
    }

    pub fn set_recovery_debug(&self, enabled: bool) {
        self.recovery_debug.store(enabled, Ordering::Relaxed);
        tracing::info!(target: "lenient::recovery", enabled, "recovery debug toggled");
    }

    pub fn recovery_debug(&self) -> bool {
        self.recovery_debug.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> OrchestratorStats {
        OrchestratorStats {
            sessions: skip_on_error("stats", self.sessions.stats()).unwrap_or_default(),
            tracked_items: skip_on_error("stats", self.drops.len()).unwrap_or_default(),
            owner_marker_available: self.owner_marker.is_available(),
            recovery_debug: self.recovery_debug(),
        }
    }

    /// Passes a death drop to the owner-marker capability when present.
    fn mark_owner(&self, entity: EntityId, owner: ActorId) {
        if let Some(marker) = self.owner_marker.get() {
            marker.mark_owned(entity, owner);
        }
    }
}

/// Unwraps a store result, logging and discarding the error.
fn skip_on_error<T>(hook: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(
                target: "lenient::session",
                hook,
                code = err.error_code(),
                severity = err.severity().as_str(),
                error = %err,
                "hook step skipped"
            );
            None
        }
    }
}
