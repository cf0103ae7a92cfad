//! Item catalog loader.

use std::path::Path;

use lenient_core::{DataDefinition, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalogData {
    pub items: Vec<ItemDefinition>,
    /// Auxiliary data blobs referenced by stacks through their data handle.
    #[serde(default)]
    pub data: Vec<DataDefinition>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// Duplicate handles or identifiers are rejected so that lookups in the
    /// runtime catalog stay unambiguous.
    pub fn load(path: &Path) -> LoadResult<ItemCatalogData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalogData> {
        let catalog: ItemCatalogData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut handles = std::collections::HashSet::new();
        let mut ids = std::collections::HashSet::new();
        for def in &catalog.items {
            if !handles.insert(def.handle) {
                anyhow::bail!("Duplicate item handle {:?} ({})", def.handle, def.id);
            }
            if !ids.insert(&def.id) {
                anyhow::bail!("Duplicate item id {}", def.id);
            }
        }

        Ok(catalog)
    }
}
