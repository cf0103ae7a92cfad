//! Interfaces the host engine implements for the orchestrator.
//!
//! The orchestrator never owns item entities. It reads them through
//! [`ItemEntities`], mutates them through the same trait, and reports to
//! players through [`DeathNotifier`]. [`OwnerMarker`] is an optional
//! capability; hosts that cannot mark owned drops simply leave it out.
mod memory;

use lenient_core::{Aabb, ActorId, DimensionId, EntityId, GlobalPos, ItemBody, ItemStack, Vec3};

pub use memory::{InMemoryItems, ItemEntity};

/// Read-only view of one live item entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemEntityView {
    pub dimension: DimensionId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub bounds: Aabb,
    pub on_fire: bool,
    pub in_lava: bool,
    pub stack: ItemStack,
}

impl ItemEntityView {
    pub fn body(&self) -> ItemBody {
        ItemBody {
            position: self.position,
            bounds: self.bounds,
        }
    }

    /// Y after applying the current velocity once.
    pub fn next_y(&self) -> f64 {
        self.position.y + self.velocity.y
    }
}

/// Move applied to an item during recovery.
///
/// Hosts zero the velocity and the fall distance along with the move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Teleport {
    pub position: Vec3,
    pub pickup_delay: u32,
    pub clear_fire: bool,
}

/// Access to live item entities.
pub trait ItemEntities {
    /// Every live item entity, in any order.
    fn live_items(&self) -> Vec<EntityId>;

    fn view(&self, entity: EntityId) -> Option<ItemEntityView>;

    /// Replaces the stack carried by the entity.
    fn set_stack(&mut self, entity: EntityId, stack: ItemStack);

    /// Removes the entity from the world.
    fn discard(&mut self, entity: EntityId);

    /// Makes the entity invulnerable and exempt from despawning.
    fn make_resilient(&mut self, entity: EntityId);

    fn teleport(&mut self, entity: EntityId, teleport: &Teleport);
}

/// Outbound player messaging.
pub trait DeathNotifier: Send + Sync {
    /// Tells a respawned actor where it died.
    fn death_coordinates(&self, actor: ActorId, pos: GlobalPos);
}

/// Cosmetic ownership marking of death drops.
pub trait OwnerMarker: Send + Sync {
    fn mark_owned(&self, entity: EntityId, owner: ActorId);
}
