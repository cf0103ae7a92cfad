//! Simple in-process item entities for tests and local runs.

use std::collections::BTreeMap;

use lenient_content::BlockKind;
use lenient_core::{Aabb, BlockPos, DimensionId, EntityId, ItemStack, Vec3, WorldOracle};

use super::{ItemEntities, ItemEntityView, Teleport};
use crate::oracle::VoxelWorld;

/// A dropped item with just enough physics to fall, land and burn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemEntity {
    pub dimension: DimensionId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub stack: ItemStack,
    pub on_fire: bool,
    pub in_lava: bool,
    pub resilient: bool,
    pub pickup_delay: u32,
    pub fall_distance: f64,
}

impl ItemEntity {
    pub const WIDTH: f64 = 0.25;
    pub const HEIGHT: f64 = 0.25;

    pub fn new(dimension: DimensionId, position: Vec3, stack: ItemStack) -> Self {
        Self {
            dimension,
            position,
            velocity: Vec3::ZERO,
            stack,
            on_fire: false,
            in_lava: false,
            resilient: false,
            pickup_delay: 0,
            fall_distance: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around_feet(self.position, Self::WIDTH, Self::HEIGHT)
    }
}

/// In-memory [`ItemEntities`] host.
#[derive(Debug, Default)]
pub struct InMemoryItems {
    entities: BTreeMap<EntityId, ItemEntity>,
    next_id: u32,
}

impl InMemoryItems {
    const GRAVITY: f64 = 0.04;
    const DRAG: f64 = 0.98;
    /// Entities this far below the build range are removed.
    const VOID_KILL_DEPTH: i32 = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: ItemEntity) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entities.insert(id, entity);
        id
    }

    pub fn get(&self, entity: EntityId) -> Option<&ItemEntity> {
        self.entities.get(&entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut ItemEntity> {
        self.entities.get_mut(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advances every entity by one tick.
    ///
    /// Returns the entities that fell out of the world or burned up.
    pub fn step(&mut self, world: &VoxelWorld) -> Vec<EntityId> {
        let mut lost = Vec::new();
        for (&id, entity) in &mut self.entities {
            entity.pickup_delay = entity.pickup_delay.saturating_sub(1);
            entity.velocity.y = (entity.velocity.y - Self::GRAVITY) * Self::DRAG;

            let next = entity.position + entity.velocity;
            let below = BlockPos::containing(next);
            if entity.velocity.y < 0.0 && world.is_solid(entity.dimension, below) {
                entity.position = Vec3::new(next.x, f64::from(below.y + 1), next.z);
                entity.velocity = Vec3::ZERO;
                entity.fall_distance = 0.0;
            } else {
                entity.fall_distance -= entity.velocity.y.min(0.0);
                entity.position = next;
            }

            let cell = BlockPos::containing(entity.position);
            entity.in_lava = world.block(entity.dimension, cell) == BlockKind::Lava;
            let burned = entity.in_lava && entity.on_fire && !entity.resilient;
            entity.on_fire |= entity.in_lava;

            let floor = world.min_build_height(entity.dimension) - Self::VOID_KILL_DEPTH;
            if burned || entity.position.y < f64::from(floor) {
                lost.push(id);
            }
        }
        for id in &lost {
            self.entities.remove(id);
        }
        lost
    }
}

impl ItemEntities for InMemoryItems {
    fn live_items(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    fn view(&self, entity: EntityId) -> Option<ItemEntityView> {
        self.entities.get(&entity).map(|e| ItemEntityView {
            dimension: e.dimension,
            position: e.position,
            velocity: e.velocity,
            bounds: e.bounds(),
            on_fire: e.on_fire,
            in_lava: e.in_lava,
            stack: e.stack,
        })
    }

    fn set_stack(&mut self, entity: EntityId, stack: ItemStack) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.stack = stack;
        }
    }

    fn discard(&mut self, entity: EntityId) {
        self.entities.remove(&entity);
    }

    fn make_resilient(&mut self, entity: EntityId) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.resilient = true;
        }
    }

    fn teleport(&mut self, entity: EntityId, teleport: &Teleport) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.position = teleport.position;
            e.velocity = Vec3::ZERO;
            e.fall_distance = 0.0;
            e.pickup_delay = teleport.pickup_delay;
            e.in_lava = false;
            if teleport.clear_fire {
                e.on_fire = false;
            }
        }
    }
}
