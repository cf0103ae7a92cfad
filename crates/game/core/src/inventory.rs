//! Slot-addressed inventory access and merge-aware insertion.

use crate::env::ItemOracle;
use crate::state::ItemStack;

/// Mutable view of an actor's slots.
///
/// Slots are addressed by index in `0..slot_count()`. `None` is an empty
/// slot; implementations should treat a zero-count stack the same way.
pub trait InventoryAccess {
    fn slot_count(&self) -> usize;

    fn get(&self, slot: usize) -> Option<ItemStack>;

    fn set(&mut self, slot: usize, stack: Option<ItemStack>);

    /// Generic insertion: tops up matching stacks first, then fills empty
    /// slots. Returns whatever did not fit.
    fn insert(&mut self, items: &dyn ItemOracle, stack: ItemStack) -> Option<ItemStack> {
        let mut remaining = stack;

        for slot in 0..self.slot_count() {
            if remaining.is_empty() {
                return None;
            }
            if self.get(slot).is_some_and(|current| !current.is_empty()) {
                remaining = merge_into(self, items, slot, remaining)?;
            }
        }

        for slot in 0..self.slot_count() {
            if remaining.is_empty() {
                return None;
            }
            if self.get(slot).is_none_or(|current| current.is_empty()) {
                let limit = items.max_stack_size(remaining.item).max(1);
                let placed = remaining.count.min(limit);
                self.set(slot, Some(remaining.with_count(placed)));
                remaining.count -= placed;
            }
        }

        (!remaining.is_empty()).then_some(remaining)
    }
}

/// Inserts into one specific slot.
///
/// An empty slot takes the whole stack. An occupied slot only accepts a
/// stackable stack of the same item and data, up to the max stack size.
/// Returns the remainder, `None` when everything was placed.
pub fn insert_into_slot(
    inventory: &mut dyn InventoryAccess,
    items: &dyn ItemOracle,
    slot: usize,
    stack: ItemStack,
) -> Option<ItemStack> {
    if stack.is_empty() {
        return None;
    }
    if slot >= inventory.slot_count() {
        return Some(stack);
    }
    match inventory.get(slot) {
        Some(current) if !current.is_empty() => merge_into(inventory, items, slot, stack),
        _ => {
            inventory.set(slot, Some(stack));
            None
        }
    }
}

fn merge_into<T: InventoryAccess + ?Sized>(
    inventory: &mut T,
    items: &dyn ItemOracle,
    slot: usize,
    stack: ItemStack,
) -> Option<ItemStack> {
    let Some(current) = inventory.get(slot) else {
        return Some(stack);
    };
    if !items.same_item_same_data(&current, &stack) || !items.is_stackable(&current) {
        return Some(stack);
    }

    let limit = items.max_stack_size(current.item);
    let room = limit.saturating_sub(current.count);
    let moved = room.min(stack.count);
    if moved > 0 {
        inventory.set(slot, Some(current.with_count(current.count + moved)));
    }
    let left = stack.count - moved;
    (left > 0).then(|| stack.with_count(left))
}

/// Plain vector-backed inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotInventory {
    slots: Vec<Option<ItemStack>>,
}

impl SlotInventory {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Non-empty slots in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, ItemStack)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, stack)| stack.filter(|s| !s.is_empty()).map(|s| (slot, s)))
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

impl InventoryAccess for SlotInventory {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, slot: usize) -> Option<ItemStack> {
        self.slots.get(slot).copied().flatten()
    }

    fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = stack.filter(|s| !s.is_empty());
        }
    }
}
