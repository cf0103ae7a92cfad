//! Manual always-preserved / always-dropped lists.

use std::collections::HashSet;

use crate::config::ListConfig;
use crate::env::ItemOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Identifier, IdentifierError, ItemHandle, ItemStack};

/// Which list a rejected entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ListKind {
    AlwaysPreservedItems,
    AlwaysPreservedTags,
    AlwaysDroppedItems,
    AlwaysDroppedTags,
}

/// A manual list entry that was skipped while resolving the lists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListEntryError {
    #[error("invalid item id {entry:?} in {list}: {source}")]
    InvalidItemId {
        list: ListKind,
        entry: String,
        source: IdentifierError,
    },

    #[error("invalid tag id {entry:?} in {list}: {source}")]
    InvalidTagId {
        list: ListKind,
        entry: String,
        source: IdentifierError,
    },

    #[error("unknown item id {id} in {list}")]
    UnknownItem { list: ListKind, id: Identifier },
}

impl GameError for ListEntryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidItemId { .. } => "LIST_INVALID_ITEM_ID",
            Self::InvalidTagId { .. } => "LIST_INVALID_TAG_ID",
            Self::UnknownItem { .. } => "LIST_UNKNOWN_ITEM",
        }
    }
}

/// Resolved manual lists keyed by item kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualLists {
    preserved: HashSet<ItemHandle>,
    dropped: HashSet<ItemHandle>,
}

impl ManualLists {
    /// Resolves raw list entries against the item registry.
    ///
    /// Item ids must name a registered item; tag ids expand to every item
    /// carrying the tag (an unknown tag expands to nothing). Entries that
    /// fail to parse or resolve are returned alongside the lists and do not
    /// stop the remaining entries from loading.
    pub fn build(config: &ListConfig, items: &dyn ItemOracle) -> (Self, Vec<ListEntryError>) {
        let mut lists = Self::default();
        let mut rejected = Vec::new();

        resolve_items(
            ListKind::AlwaysPreservedItems,
            &config.always_preserved_items,
            items,
            &mut lists.preserved,
            &mut rejected,
        );
        resolve_tags(
            ListKind::AlwaysPreservedTags,
            &config.always_preserved_tags,
            items,
            &mut lists.preserved,
            &mut rejected,
        );
        resolve_items(
            ListKind::AlwaysDroppedItems,
            &config.always_dropped_items,
            items,
            &mut lists.dropped,
            &mut rejected,
        );
        resolve_tags(
            ListKind::AlwaysDroppedTags,
            &config.always_dropped_tags,
            items,
            &mut lists.dropped,
            &mut rejected,
        );

        (lists, rejected)
    }

    /// `Some(false)` when listed as dropped (wins over preserved),
    /// `Some(true)` when listed as preserved, `None` otherwise.
    pub fn verdict(&self, stack: &ItemStack) -> Option<bool> {
        if self.dropped.contains(&stack.item) {
            Some(false)
        } else if self.preserved.contains(&stack.item) {
            Some(true)
        } else {
            None
        }
    }

    pub fn preserved_len(&self) -> usize {
        self.preserved.len()
    }

    pub fn dropped_len(&self) -> usize {
        self.dropped.len()
    }
}

fn resolve_items(
    list: ListKind,
    entries: &[String],
    items: &dyn ItemOracle,
    into: &mut HashSet<ItemHandle>,
    rejected: &mut Vec<ListEntryError>,
) {
    for entry in entries {
        let id = match Identifier::parse(entry) {
            Ok(id) => id,
            Err(source) => {
                rejected.push(ListEntryError::InvalidItemId {
                    list,
                    entry: entry.clone(),
                    source,
                });
                continue;
            }
        };
        match items.resolve(&id) {
            Some(handle) => {
                into.insert(handle);
            }
            None => rejected.push(ListEntryError::UnknownItem { list, id }),
        }
    }
}

fn resolve_tags(
    list: ListKind,
    entries: &[String],
    items: &dyn ItemOracle,
    into: &mut HashSet<ItemHandle>,
    rejected: &mut Vec<ListEntryError>,
) {
    for entry in entries {
        match Identifier::parse(entry) {
            Ok(tag) => into.extend(items.items_in_tag(&tag)),
            Err(source) => rejected.push(ListEntryError::InvalidTagId {
                list,
                entry: entry.clone(),
                source,
            }),
        }
    }
}
