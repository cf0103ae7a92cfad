//! Item stack value types.
//!
//! The core never looks inside a stack beyond its count. Kind equality and
//! auxiliary-data lookups go through [`ItemOracle`](crate::env::ItemOracle).

/// Reference to an item kind registered with the item oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// Reference to a stack's auxiliary data (custom tags, enchantments, names).
///
/// `DataHandle::NONE` means the stack carries no auxiliary data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataHandle(pub u32);

impl DataHandle {
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Copyable stack reference: kind, count and auxiliary data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: ItemHandle,
    pub count: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: DataHandle,
}

impl ItemStack {
    pub const fn new(item: ItemHandle, count: u16) -> Self {
        Self {
            item,
            count,
            data: DataHandle::NONE,
        }
    }

    #[must_use]
    pub const fn with_data(mut self, data: DataHandle) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: u16) -> Self {
        self.count = count;
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Splits off `keep` units. Returns `(kept, remainder)`; either side is
    /// `None` when it would be empty.
    pub fn split(self, keep: u16) -> (Option<ItemStack>, Option<ItemStack>) {
        let keep = keep.min(self.count);
        let rest = self.count - keep;
        let kept = (keep > 0).then(|| self.with_count(keep));
        let remainder = (rest > 0).then(|| self.with_count(rest));
        (kept, remainder)
    }
}
