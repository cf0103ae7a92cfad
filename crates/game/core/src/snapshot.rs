//! Inventory layout captured at the moment of death.

use std::collections::BTreeMap;

use crate::env::ItemOracle;
use crate::inventory::InventoryAccess;
use crate::state::ItemStack;

/// Slot-to-stack copy of an inventory, drained as drops are matched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    slots: BTreeMap<usize, ItemStack>,
}

impl InventorySnapshot {
    /// Copies every non-empty slot.
    pub fn capture(inventory: &dyn InventoryAccess) -> Self {
        let slots = (0..inventory.slot_count())
            .filter_map(|slot| {
                inventory
                    .get(slot)
                    .filter(|stack| !stack.is_empty())
                    .map(|stack| (slot, stack))
            })
            .collect();
        Self { slots }
    }

    /// Removes and returns the lowest slot holding the same item with the
    /// same auxiliary data as `stack`. Counts are not compared.
    pub fn take_match(&mut self, items: &dyn ItemOracle, stack: &ItemStack) -> Option<usize> {
        let slot = self
            .slots
            .iter()
            .find(|(_, candidate)| items.same_item_same_data(candidate, stack))
            .map(|(slot, _)| *slot)?;
        self.slots.remove(&slot);
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
