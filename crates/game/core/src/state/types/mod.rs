pub mod common;
pub mod identifier;
pub mod item;
pub mod world;

pub use common::{ActorId, EntityId, Tick};
pub use identifier::{Identifier, IdentifierError};
pub use item::{DataHandle, ItemHandle, ItemStack};
pub use world::{Aabb, BlockPos, DimensionId, GlobalPos, Vec3};
