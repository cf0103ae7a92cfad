//! Content loading for xtask commands
//!
//! Every command accepts optional paths to a config, item catalog and world
//! layout. Missing paths fall back to the demo files bundled under
//! `crates/xtask/content`.

use anyhow::{Context, Result};
use std::path::Path;

use lenient_content::{ConfigLoader, ItemCatalogData, ItemLoader, WorldLayout, WorldLoader};
use lenient_core::DeathConfig;

const DEMO_CONFIG: &str = include_str!("../content/lenientdeath.toml");
const DEMO_ITEMS: &str = include_str!("../content/items.ron");
const DEMO_WORLD: &str = include_str!("../content/world.ron");

pub fn config(path: Option<&Path>) -> Result<DeathConfig> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => ConfigLoader::parse(DEMO_CONFIG).context("Bundled demo config is invalid"),
    }
}

pub fn items(path: Option<&Path>) -> Result<ItemCatalogData> {
    match path {
        Some(path) => ItemLoader::load(path)
            .with_context(|| format!("Failed to load item catalog: {}", path.display())),
        None => ItemLoader::parse(DEMO_ITEMS).context("Bundled demo item catalog is invalid"),
    }
}

pub fn world(path: Option<&Path>) -> Result<WorldLayout> {
    match path {
        Some(path) => WorldLoader::load(path)
            .with_context(|| format!("Failed to load world layout: {}", path.display())),
        None => WorldLoader::parse(DEMO_WORLD).context("Bundled demo world is invalid"),
    }
}

/// Describes where a piece of content came from, for headers.
pub fn source(path: Option<&Path>) -> String {
    path.map_or_else(|| "bundled demo".to_string(), |p| p.display().to_string())
}
