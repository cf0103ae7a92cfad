//! Builder for [`DeathOrchestrator`].

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use lenient_core::{Capability, DeathConfig};

use super::DeathOrchestrator;
use crate::config::ConfigHandle;
use crate::drops::DropTable;
use crate::error::BuildError;
use crate::host::{DeathNotifier, OwnerMarker};
use crate::oracle::OracleManager;
use crate::session::SessionStore;

/// Builder for [`DeathOrchestrator`].
///
/// Oracles are required. Configuration defaults to [`DeathConfig::default`];
/// the notifier and owner marker are optional.
#[derive(Default)]
pub struct OrchestratorBuilder {
    oracles: Option<OracleManager>,
    config: Option<DeathConfig>,
    config_handle: Option<Arc<ConfigHandle>>,
    notifier: Option<Arc<dyn DeathNotifier>>,
    owner_marker: Option<Arc<dyn OwnerMarker>>,
    world_seed: u64,
}

impl OrchestratorBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Initial configuration. Ignored when a shared handle is supplied.
    pub fn config(mut self, config: DeathConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing configuration handle, e.g. one also held by a
    /// file watcher.
    pub fn config_handle(mut self, handle: Arc<ConfigHandle>) -> Self {
        self.config_handle = Some(handle);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn DeathNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn owner_marker(mut self, marker: Arc<dyn OwnerMarker>) -> Self {
        self.owner_marker = Some(marker);
        self
    }

    /// Seed mixed into randomizer rolls.
    pub fn world_seed(mut self, seed: u64) -> Self {
        self.world_seed = seed;
        self
    }

    pub fn build(self) -> Result<DeathOrchestrator, BuildError> {
        let oracles = self.oracles.ok_or(BuildError::MissingOracles)?;

        let config = match self.config_handle {
            Some(handle) => handle,
            None => Arc::new(ConfigHandle::new(
                self.config.unwrap_or_default(),
                oracles.items(),
            )),
        };

        let owner_marker = Capability::from_option(self.owner_marker, "no owner marker installed");
        if let Some(reason) = owner_marker.reason() {
            tracing::warn!(
                target: "lenient::death",
                capability = "owner_marker",
                reason,
                "capability unavailable, death drops will not be marked"
            );
        }

        Ok(DeathOrchestrator {
            oracles,
            config,
            sessions: SessionStore::new(),
            drops: DropTable::new(),
            notifier: self.notifier,
            owner_marker,
            world_seed: self.world_seed,
            recovery_debug: AtomicBool::new(false),
        })
    }
}
