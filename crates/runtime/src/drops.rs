//! Typed side-table for dropped item entities.

use std::collections::HashMap;
use std::sync::RwLock;

use lenient_core::{ActorId, DroppedItemState, EntityId};

use crate::error::{Result, poisoned};

/// Runtime state of live dropped items, keyed by entity id.
///
/// Items without an entry are plain drops: not owned, not a death drop,
/// no stored safe point and a fresh limiter.
pub struct DropTable {
    items: RwLock<HashMap<EntityId, DroppedItemState>>,
}

impl DropTable {
    const NAME: &'static str = "drop table";

    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, entity: EntityId, state: DroppedItemState) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned(Self::NAME))?;
        items.insert(entity, state);
        Ok(())
    }

    pub fn get(&self, entity: EntityId) -> Result<Option<DroppedItemState>> {
        let items = self.items.read().map_err(poisoned(Self::NAME))?;
        Ok(items.get(&entity).copied())
    }

    /// Runs `f` on the entry for `entity`. Returns `None`, leaving the
    /// table untouched, when the entity has no entry.
    pub fn update<T>(
        &self,
        entity: EntityId,
        f: impl FnOnce(&mut DroppedItemState) -> T,
    ) -> Result<Option<T>> {
        let mut items = self.items.write().map_err(poisoned(Self::NAME))?;
        Ok(items.get_mut(&entity).map(f))
    }

    /// Overwrites an existing entry. Returns whether one was present.
    pub fn replace_existing(&self, entity: EntityId, state: DroppedItemState) -> Result<bool> {
        Ok(self.update(entity, |current| *current = state)?.is_some())
    }

    /// Reassigns every entry owned by `from` to `to`. Returns how many moved.
    pub fn transfer_owner(&self, from: ActorId, to: ActorId) -> Result<usize> {
        let mut items = self.items.write().map_err(poisoned(Self::NAME))?;
        let mut moved = 0;
        for state in items.values_mut().filter(|s| s.owner == Some(from)) {
            state.owner = Some(to);
            moved += 1;
        }
        Ok(moved)
    }

    pub fn remove(&self, entity: EntityId) -> Result<Option<DroppedItemState>> {
        let mut items = self.items.write().map_err(poisoned(Self::NAME))?;
        Ok(items.remove(&entity))
    }

    pub fn len(&self) -> Result<usize> {
        let items = self.items.read().map_err(poisoned(Self::NAME))?;
        Ok(items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for DropTable {
    fn default() -> Self {
        Self::new()
    }
}
