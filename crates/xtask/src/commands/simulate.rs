//! Scripted death scenario
//!
//! Walks an actor away from spawn across the loaded world, kills them past
//! the edge of the ground, then ticks the in-memory item host until the
//! drops are recovered or lost. Prints what was kept, where each drop ended
//! up and what came back on respawn.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::sync::Arc;

use lenient_core::{
    ActorId, BlockPos, DeathConfig, EntityId, GlobalPos, InventoryAccess, ItemOracle, ItemStack,
    SlotInventory, Tick, Vec3, WorldOracle,
};
use lenient_runtime::{
    ActorTick, DeathContext, DeathNotifier, DeathOrchestrator, InMemoryItems, ItemCatalog,
    ItemEntity, OracleManager, OwnerMarker, VoxelWorld,
};

use crate::content;

const ACTOR: ActorId = ActorId(1);
const INVENTORY_SLOTS: usize = 36;

/// Run a scripted death over the void and report what happened
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Config file (TOML); defaults to the bundled demo config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Item catalog (RON); defaults to the bundled demo catalog
    #[arg(short, long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// World layout (RON); defaults to the bundled demo island
    #[arg(short, long, value_name = "FILE")]
    world: Option<PathBuf>,

    /// Blocks walked east of spawn before dying
    #[arg(long, default_value_t = 24)]
    distance: i32,

    /// Ticks simulated after the death
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Log every recovery decision at info level
    #[arg(long)]
    recovery_debug: bool,
}

/// Prints death coordinates the way a chat message would show them.
struct ConsoleNotifier;

impl DeathNotifier for ConsoleNotifier {
    fn death_coordinates(&self, actor: ActorId, pos: GlobalPos) {
        println!(
            "{} {} died at {} {} {} in {}",
            style("☠").red().bold(),
            actor,
            pos.pos.x,
            pos.pos.y,
            pos.pos.z,
            pos.dimension
        );
    }
}

struct TracingMarker;

impl OwnerMarker for TracingMarker {
    fn mark_owned(&self, entity: EntityId, owner: ActorId) {
        tracing::debug!(target: "xtask::simulate", %entity, %owner, "drop marked as owned");
    }
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let config = content::config(self.config.as_deref())?;
        let data = content::items(self.items.as_deref())?;
        let layout = content::world(self.world.as_deref())?;
        let dimension = layout
            .dimensions
            .first()
            .map(|dim| dim.id)
            .context("World layout has no dimensions")?;

        let loadout: Vec<ItemStack> = data
            .items
            .iter()
            .take(INVENTORY_SLOTS)
            .map(|def| ItemStack::new(def.handle, def.max_stack.max(1)))
            .collect();

        let world = Arc::new(VoxelWorld::from_layout(&layout));
        let catalog = Arc::new(ItemCatalog::from_data(data));
        let orchestrator = DeathOrchestrator::builder()
            .oracles(OracleManager::new(
                Arc::clone(&world) as Arc<dyn WorldOracle>,
                Arc::clone(&catalog) as Arc<dyn ItemOracle>,
            ))
            .config(config)
            .notifier(Arc::new(ConsoleNotifier))
            .owner_marker(Arc::new(TracingMarker))
            .world_seed(layout.seed)
            .build()?;
        orchestrator.set_recovery_debug(self.recovery_debug);
        orchestrator.on_connect(ACTOR);

        println!("{}", style("=== Lenient Death Simulation ===").bold().green());
        println!(
            "  Config: {}\n  Items: {} ({} kinds)\n  World: {} (seed {})",
            content::source(self.config.as_deref()),
            content::source(self.items.as_deref()),
            catalog.len(),
            content::source(self.world.as_deref()),
            layout.seed
        );
        println!();

        // ===== walk =====
        let spawn = world.spawn_point(dimension);
        let mut now = Tick::ZERO;
        let mut grounded = 0;
        for step in 0..=self.distance {
            let feet = spawn.offset(step, 0, 0);
            let on_ground = world.is_solid(dimension, feet.below());
            grounded += usize::from(on_ground);
            orchestrator.on_actor_tick(&ActorTick {
                actor: ACTOR,
                now,
                position: GlobalPos::new(dimension, feet),
                on_ground,
                spectator: false,
            });
            now = now + DeathConfig::SAFE_POS_UPDATE_TICKS;
        }
        println!("{}", style("Walk:").bold().yellow());
        println!(
            "  {} blocks east of {}, {} on solid ground",
            self.distance, spawn, grounded
        );
        println!();

        // ===== death =====
        let mut inventory = SlotInventory::new(INVENTORY_SLOTS);
        for (slot, stack) in loadout.iter().enumerate() {
            inventory.set(slot, Some(*stack));
        }
        let died_at = spawn.offset(self.distance, 2, 0).bottom_center();
        let death = DeathContext {
            actor: ACTOR,
            dimension,
            position: died_at,
            luck: 0.0,
            now,
        };
        orchestrator.on_death(&death, &inventory);

        let mut host = InMemoryItems::new();
        let mut drops: Vec<EntityId> = inventory
            .occupied()
            .map(|(_, stack)| host.spawn(ItemEntity::new(dimension, died_at, stack)))
            .collect();
        inventory.clear();
        let report = orchestrator.on_drops(&death, &mut drops, &mut host);

        println!("{}", style("Death:").bold().yellow());
        println!("  Position: {}", died_at);
        println!(
            "  Kept: {} stacks ({} items)",
            report.kept_stacks, report.kept_units
        );
        println!("  Dropped: {} stacks", report.dropped);
        if report.immediate_recoveries > 0 {
            println!("  Recovered on the spot: {}", report.immediate_recoveries);
        }
        println!();

        // ===== ticks =====
        let mut recovered = 0;
        let mut limited = 0;
        let mut lost = Vec::new();
        for _ in 0..self.ticks {
            now = now + 1;
            for entity in host.step(&world) {
                orchestrator.forget_item(entity);
                lost.push(entity);
            }
            let tick = orchestrator.tick(now, &mut host);
            recovered += tick.recovered;
            limited += tick.rate_limited;
        }

        println!("{}", style("Drops:").bold().yellow());
        println!(
            "  {} recoveries, {} held back by the limiter over {} ticks",
            recovered, limited, self.ticks
        );
        for entity in &drops {
            match host.get(*entity) {
                Some(item) => println!(
                    "  {} {} x{} at {}",
                    style("✓").green(),
                    item_name(&catalog, &item.stack),
                    item.stack.count,
                    item.position
                ),
                None if lost.contains(entity) => {
                    println!("  {} {} lost", style("✗").red(), entity)
                }
                None => println!("  {} {} despawned", style("-").dim(), entity),
            }
        }
        println!();

        // ===== respawn =====
        let mut respawned = SlotInventory::new(INVENTORY_SLOTS);
        let back = orchestrator.on_respawn(ACTOR, ACTOR, &mut respawned);

        println!("{}", style("Respawn:").bold().yellow());
        println!(
            "  {} back in their slot, {} inserted, {} spilled",
            back.restored_to_slot,
            back.inserted,
            back.spilled.len()
        );
        for (slot, stack) in respawned.occupied() {
            println!(
                "  [{:>2}] {} x{}",
                slot,
                item_name(&catalog, &stack),
                stack.count
            );
        }
        if let Some(pos) = back.carried_safe_pos {
            println!("  Last safe position: {}", pos);
        }
        println!();

        let stats = orchestrator.stats();
        println!("{}", style("Runtime state:").bold().yellow());
        println!(
            "  Sessions: {} ({} with history)",
            stats.sessions.sessions, stats.sessions.with_history
        );
        println!("  Tracked items: {}", stats.tracked_items);

        Ok(())
    }
}

fn item_name(catalog: &ItemCatalog, stack: &ItemStack) -> String {
    catalog
        .definition(stack.item)
        .map_or_else(|| format!("item#{}", stack.item.0), |def| def.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_scenario_runs() {
        let cmd = Simulate {
            config: None,
            items: None,
            world: None,
            distance: 24,
            ticks: 200,
            recovery_debug: false,
        };
        cmd.execute().unwrap();
    }

    #[test]
    fn unknown_items_fall_back_to_their_handle() {
        let catalog = ItemCatalog::new();
        let stack = ItemStack::new(lenient_core::ItemHandle(9), 1);
        assert_eq!(item_name(&catalog, &stack), "item#9");
    }
}
