//! Hot-reloadable configuration snapshot.

use std::sync::{Arc, RwLock};

use lenient_core::{DeathConfig, GameError, ItemOracle, ListEntryError, ManualLists};

use crate::error::{Result, poisoned};

/// One consistent view of the configuration: the parameters plus the manual
/// lists resolved against the item registry at load time.
#[derive(Debug)]
pub struct ConfigSnapshot {
    pub config: DeathConfig,
    pub lists: ManualLists,
    /// List entries skipped while resolving `lists`.
    pub rejected: Vec<ListEntryError>,
}

impl ConfigSnapshot {
    /// Sanitizes `config` and resolves its manual lists.
    ///
    /// Rejected list entries are logged and kept on the snapshot; they
    /// never fail the build.
    pub fn build(config: DeathConfig, items: &dyn ItemOracle) -> Self {
        let config = config.sanitized();
        let (lists, rejected) = ManualLists::build(&config.lists, items);

        for entry in &rejected {
            tracing::warn!(
                target: "lenient::config",
                code = entry.error_code(),
                severity = entry.severity().as_str(),
                "skipping list entry: {}",
                entry
            );
        }
        tracing::debug!(
            target: "lenient::config",
            preserved = lists.preserved_len(),
            dropped = lists.dropped_len(),
            rejected = rejected.len(),
            "resolved manual lists"
        );

        Self {
            config,
            lists,
            rejected,
        }
    }
}

/// Owner of the live [`ConfigSnapshot`].
///
/// Readers take the current `Arc` once per hook and keep using it for the
/// rest of that hook; a reload only affects hooks that start after it.
#[derive(Debug)]
pub struct ConfigHandle {
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl ConfigHandle {
    pub fn new(config: DeathConfig, items: &dyn ItemOracle) -> Self {
        Self::from_snapshot(ConfigSnapshot::build(config, items))
    }

    pub fn from_snapshot(snapshot: ConfigSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn current(&self) -> Result<Arc<ConfigSnapshot>> {
        let current = self.current.read().map_err(poisoned("config"))?;
        Ok(Arc::clone(&current))
    }

    /// Replaces the live snapshot and returns the new one.
    pub fn reload(&self, config: DeathConfig, items: &dyn ItemOracle) -> Result<Arc<ConfigSnapshot>> {
        let snapshot = Arc::new(ConfigSnapshot::build(config, items));
        let mut current = self.current.write().map_err(poisoned("config"))?;
        *current = Arc::clone(&snapshot);
        tracing::info!(target: "lenient::config", "configuration reloaded");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::catalog;

    #[test]
    fn rejected_entries_do_not_block_the_rest() {
        let items = catalog();
        let mut config = DeathConfig::default();
        config.lists.always_dropped_items = vec![
            "minecraft:dirt".into(),
            "Bad Id".into(),
            "minecraft:not_registered".into(),
        ];

        let snapshot = ConfigSnapshot::build(config, &items);
        assert_eq!(snapshot.lists.dropped_len(), 1);
        assert_eq!(snapshot.rejected.len(), 2);
    }

    #[test]
    fn reload_swaps_but_held_snapshots_stay_stable() {
        let items = catalog();
        let handle = ConfigHandle::new(DeathConfig::default(), &items);
        let held = handle.current().unwrap();

        let mut next = DeathConfig::default();
        next.restore_slots = false;
        next.recovery.max_recoveries = 0;
        handle.reload(next, &items).unwrap();

        assert!(held.config.restore_slots);
        let live = handle.current().unwrap();
        assert!(!live.config.restore_slots);
        assert_eq!(live.config.recovery.max_recoveries, 1);
    }
}
