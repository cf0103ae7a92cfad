//! Content loaders for reading death-pipeline data from files.
//!
//! Each loader turns one RON/TOML file into the lenient-core (or layout)
//! types the runtime consumes. Parsing failures are returned as
//! `anyhow` errors carrying the file and format context.

pub mod config;
pub mod item;
pub mod world;

pub use config::ConfigLoader;
pub use item::{ItemCatalogData, ItemLoader};
pub use world::WorldLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
