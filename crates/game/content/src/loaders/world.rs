//! World layout loader.
//!
//! Loads block layouts for the reference voxel world. Layouts describe
//! terrain only; actors and items are placed by whoever drives the runtime.

use std::path::Path;

use crate::layout::WorldLayout;
use crate::loaders::{LoadResult, read_file};

/// Loader for [`WorldLayout`] from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<WorldLayout> {
        let layout: WorldLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world layout RON: {}", e))?;

        for dim in &layout.dimensions {
            if dim.max_build_height <= dim.min_build_height + 2 {
                anyhow::bail!(
                    "Dimension {} has an empty build range ({}..{})",
                    dim.id,
                    dim.min_build_height,
                    dim.max_build_height
                );
            }
        }

        Ok(layout)
    }
}
