//! Value types shared by every layer.
//!
//! Everything here is plain copied data. Nothing holds a reference into the
//! live world; positions and ownership are looked up again each tick.
pub mod types;

pub use types::{
    Aabb, ActorId, BlockPos, DataHandle, DimensionId, EntityId, GlobalPos, Identifier,
    IdentifierError, ItemHandle, ItemStack, Tick, Vec3,
};
