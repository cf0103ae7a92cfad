//! Runtime orchestration for the lenient death pipeline.
//!
//! This crate wires the pure decision and recovery logic of `lenient-core`
//! to a host engine. The host calls lifecycle hooks on
//! [`DeathOrchestrator`]; the orchestrator keeps per-actor sessions and a
//! per-item side-table, reads the hot-reloadable configuration, and logs
//! through `tracing`.
//!
//! Modules are organized by responsibility:
//! - [`orchestrator`] hosts the hooks and their builder
//! - [`session`] and [`drops`] hold per-actor and per-item runtime state
//! - [`config`] owns the live configuration snapshot
//! - [`host`] defines what the host engine implements
//! - [`oracle`] provides reference oracles over loaded content
pub mod config;
pub mod drops;
pub mod error;
pub mod host;
pub mod oracle;
pub mod orchestrator;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{ConfigHandle, ConfigSnapshot};
pub use drops::DropTable;
pub use error::{BuildError, Result, StoreError};
pub use host::{
    DeathNotifier, InMemoryItems, ItemEntities, ItemEntity, ItemEntityView, OwnerMarker, Teleport,
};
pub use oracle::{ItemCatalog, OracleManager, VoxelWorld};
pub use orchestrator::{
    ActorTick, DeathContext, DeathOrchestrator, DropReport, OrchestratorBuilder,
    OrchestratorStats, PickupOutcome, RespawnReport, TickReport,
};
pub use session::{ActorSession, PreservedItemRecord, SessionStats, SessionStore};
