//! Common error infrastructure for lenient-core.
//!
//! Nothing in the death pipeline is fatal to the host. Errors exist to be
//! logged and skipped: a malformed list entry is dropped, a missing
//! capability disables one cosmetic feature, a poisoned store skips one hook.
//! Missing snapshots, histories and safe points are not errors at all; they
//! surface as `Option` and the next fallback tier runs.

use crate::state::IdentifierError;

/// Severity level of an error, used for log level and handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that is skipped without affecting other entries.
    ///
    /// Examples: malformed item id in a manual list, unknown tag
    Validation,

    /// Optional capability unavailable; the dependent feature is disabled
    /// for the process lifetime.
    Degraded,

    /// Unexpected state inconsistency such as a poisoned lock.
    ///
    /// The affected hook is skipped. These indicate bugs and should be
    /// investigated.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Degraded => "degraded",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for errors raised anywhere in the death pipeline.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by how the caller should react, not by impact
/// - Error codes are stable, uppercase, and prefixed by their domain
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code for log filtering.
    fn error_code(&self) -> &'static str;
}

impl GameError for IdentifierError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "IDENT_EMPTY",
            Self::InvalidNamespace { .. } => "IDENT_INVALID_NAMESPACE",
            Self::InvalidPath { .. } => "IDENT_INVALID_PATH",
        }
    }
}
