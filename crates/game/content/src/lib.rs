//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files the death pipeline
//! runs against:
//! - Death configuration (TOML)
//! - Item catalogs with registered custom data (RON)
//! - World layouts for the reference voxel world (RON)
//!
//! Content is consumed by runtime oracles and the configuration handle; it
//! never appears in per-actor or per-item state.

pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use layout::{BlockKind, DimensionLayout, WorldLayout};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ItemCatalogData, ItemLoader, WorldLoader};
