//! Death configuration loader.

use std::path::Path;

use lenient_core::DeathConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`DeathConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys keep their defaults; ranged values are
    /// clamped through [`DeathConfig::sanitized`].
    pub fn load(path: &Path) -> LoadResult<DeathConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<DeathConfig> {
        let config: DeathConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config.sanitized())
    }
}
