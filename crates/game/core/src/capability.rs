//! Optional host capabilities resolved once at startup.

/// Either a usable handle or the reason it could not be wired.
///
/// A missing capability only disables the feature that depends on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn from_option(handle: Option<T>, reason: impl Into<String>) -> Self {
        match handle {
            Some(handle) => Self::Available(handle),
            None => Self::unavailable(reason),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Available(handle) => Some(handle),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}
