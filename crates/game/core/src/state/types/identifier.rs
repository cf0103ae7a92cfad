//! Namespaced `namespace:path` identifiers for items and tags.

use std::fmt;
use std::str::FromStr;

/// Errors produced while parsing an [`Identifier`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("invalid namespace character {ch:?} in {input:?}")]
    InvalidNamespace { input: String, ch: char },

    #[error("invalid path character {ch:?} in {input:?}")]
    InvalidPath { input: String, ch: char },
}

/// Item or tag identifier.
///
/// The namespace defaults to `minecraft` when omitted or empty, so
/// `diamond`, `:diamond` and `minecraft:diamond` parse to the same value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Parses `namespace:path` or a bare `path`.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let trimmed = input.trim();
        let (namespace, path) = match trimmed.split_once(':') {
            Some(("", path)) => (Self::DEFAULT_NAMESPACE, path),
            Some((ns, path)) => (ns, path),
            None => (Self::DEFAULT_NAMESPACE, trimmed),
        };

        if path.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if let Some(ch) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(IdentifierError::InvalidNamespace {
                input: input.to_owned(),
                ch,
            });
        }
        if let Some(ch) = path.chars().find(|c| !is_path_char(*c)) {
            return Err(IdentifierError::InvalidPath {
                input: input.to_owned(),
                ch,
            });
        }

        Ok(Self {
            namespace: namespace.to_owned(),
            path: path.to_owned(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
