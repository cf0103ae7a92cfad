//! [`ItemOracle`] backed by an in-memory item catalog.

use std::collections::{BTreeMap, HashMap};

use lenient_core::{
    DataDefinition, DataHandle, Identifier, ItemCategories, ItemDefinition, ItemHandle,
    ItemOracle, ItemStack,
};

use lenient_content::ItemCatalogData;

/// ItemOracle implementation with static item definitions and registered
/// custom data.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    definitions: HashMap<ItemHandle, ItemDefinition>,
    by_id: HashMap<Identifier, ItemHandle>,
    tags: HashMap<Identifier, Vec<ItemHandle>>,
    data: HashMap<DataHandle, BTreeMap<String, bool>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from loaded content.
    pub fn from_data(data: ItemCatalogData) -> Self {
        let mut catalog = Self::new();
        for def in data.items {
            catalog.add_definition(def);
        }
        for blob in data.data {
            catalog.add_data(blob);
        }
        catalog
    }

    /// Add an item definition. A later definition with the same handle
    /// replaces the earlier one.
    pub fn add_definition(&mut self, def: ItemDefinition) {
        if let Some(previous) = self.definitions.remove(&def.handle) {
            self.by_id.remove(&previous.id);
            for members in self.tags.values_mut() {
                members.retain(|handle| *handle != previous.handle);
            }
        }
        self.by_id.insert(def.id.clone(), def.handle);
        for tag in &def.tags {
            self.tags.entry(tag.clone()).or_default().push(def.handle);
        }
        self.definitions.insert(def.handle, def);
    }

    /// Register custom data flags for a data handle.
    pub fn add_data(&mut self, data: DataDefinition) {
        self.data.insert(data.handle, data.flags);
    }

    pub fn definition(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.definitions.get(&handle)
    }

    /// Stack of the item registered under `id`, if any.
    pub fn stack(&self, id: &str, count: u16) -> Option<ItemStack> {
        let id = Identifier::parse(id).ok()?;
        self.resolve(&id).map(|handle| ItemStack::new(handle, count))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn resolve(&self, id: &Identifier) -> Option<ItemHandle> {
        self.by_id.get(id).copied()
    }

    fn items_in_tag(&self, tag: &Identifier) -> Vec<ItemHandle> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    fn max_stack_size(&self, item: ItemHandle) -> u16 {
        self.definitions.get(&item).map_or(64, |def| def.max_stack)
    }

    fn custom_flag(&self, stack: &ItemStack, key: &str) -> Option<bool> {
        if stack.data.is_none() {
            return None;
        }
        self.data.get(&stack.data)?.get(key).copied()
    }

    fn categories(&self, stack: &ItemStack) -> ItemCategories {
        self.definitions
            .get(&stack.item)
            .map_or(ItemCategories::empty(), |def| def.categories)
    }
}
