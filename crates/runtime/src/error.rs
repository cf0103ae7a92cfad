//! Error types raised by the runtime stores.
//!
//! None of these reach the host: orchestrator hooks log them and skip the
//! affected step.

use lenient_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by the session store, the item side-table and the
/// configuration handle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{store} lock was poisoned")]
    LockPoisoned { store: &'static str },
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned { .. } => "STORE_LOCK_POISONED",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while assembling a [`DeathOrchestrator`](crate::DeathOrchestrator).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("orchestrator requires oracles to be configured before building")]
    MissingOracles,
}

pub(crate) fn poisoned<G>(store: &'static str) -> impl FnOnce(G) -> StoreError {
    move |_| StoreError::LockPoisoned { store }
}
