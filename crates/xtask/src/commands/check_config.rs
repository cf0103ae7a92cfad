//! Validate a death config against an item catalog
//!
//! Resolves the manual lists the same way the runtime does on (re)load and
//! prints every entry that would be skipped.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use lenient_core::{DeathConfig, GameError};
use lenient_runtime::{ConfigSnapshot, ItemCatalog};

use crate::content;

/// Validate a config file against an item catalog
#[derive(Parser, Debug)]
pub struct CheckConfig {
    /// Config file (TOML); defaults to the bundled demo config
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Item catalog (RON); defaults to the bundled demo catalog
    #[arg(short, long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Fail when any list entry is rejected
    #[arg(long)]
    strict: bool,
}

impl CheckConfig {
    pub fn execute(self) -> Result<()> {
        let config = content::config(self.config.as_deref())?;
        let catalog = ItemCatalog::from_data(content::items(self.items.as_deref())?);

        println!(
            "{} {}",
            style("Config:").bold().cyan(),
            content::source(self.config.as_deref())
        );
        println!(
            "{} {} ({} items)",
            style("Items:").bold().cyan(),
            content::source(self.items.as_deref()),
            catalog.len()
        );
        println!();

        let snapshot = ConfigSnapshot::build(config, &catalog);
        print_summary(&snapshot.config);

        println!("{}", style("Manual lists:").bold().yellow());
        println!("  Always preserved: {} items", snapshot.lists.preserved_len());
        println!("  Always dropped: {} items", snapshot.lists.dropped_len());
        println!();

        if snapshot.rejected.is_empty() {
            println!("{} all list entries resolved", style("✓").green().bold());
            return Ok(());
        }

        println!(
            "{} {} rejected list entries:",
            style("✗").red().bold(),
            snapshot.rejected.len()
        );
        for entry in &snapshot.rejected {
            println!("  [{}] {}", style(entry.error_code()).dim(), entry);
        }

        if self.strict {
            anyhow::bail!("{} list entries were rejected", snapshot.rejected.len());
        }
        Ok(())
    }
}

fn on_off(enabled: bool) -> console::StyledObject<&'static str> {
    if enabled {
        style("on").green()
    } else {
        style("off").red()
    }
}

fn print_summary(config: &DeathConfig) {
    println!("{}", style("=== Death Config Summary ===").bold().green());
    println!();

    println!("{}", style("Preservation:").bold().yellow());
    println!("  Chain: {}", on_off(config.preservation.enabled));
    println!(
        "  Marker: {} (key {:?})",
        on_off(config.marker.enabled),
        config.marker.key
    );
    println!("  Item types: {}", on_off(config.item_types.enabled));
    println!(
        "  Randomizer: {} ({}% base, +{}% per luck, x{} multiplier)",
        on_off(config.randomizer.enabled),
        config.randomizer.chance_percent,
        config.randomizer.luck_additive,
        config.randomizer.luck_multiplier
    );
    println!("  Restore slots: {}", on_off(config.restore_slots));
    println!();

    let recovery = &config.recovery;
    println!("{}", style("Recovery:").bold().yellow());
    println!("  Void: {}", on_off(recovery.void_enabled));
    println!("  Hazards: {}", on_off(recovery.hazard_enabled));
    println!("  Scope: {}", recovery.scope);
    println!(
        "  Limiter: {} per {} ticks, {} tick cooldown",
        recovery.max_recoveries, recovery.window_ticks, recovery.cooldown_ticks
    );
    println!();

    let features = &config.features;
    println!("{}", style("Features:").bold().yellow());
    println!("  Death coordinates: {}", on_off(features.death_coordinates));
    println!("  Item resilience: {}", on_off(features.item_resilience));
    println!("  Owner marker: {}", on_off(features.owner_marker));
    println!();
}
