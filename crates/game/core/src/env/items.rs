use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::state::{DataHandle, Identifier, ItemHandle, ItemStack};

/// Item registry and auxiliary-data lookups.
pub trait ItemOracle: Send + Sync {
    /// Resolves a registered item id.
    fn resolve(&self, id: &Identifier) -> Option<ItemHandle>;

    /// Items carrying the tag. Unknown tags are empty.
    fn items_in_tag(&self, tag: &Identifier) -> Vec<ItemHandle>;

    fn max_stack_size(&self, item: ItemHandle) -> u16;

    /// Boolean flag stored under `key` in the stack's custom data.
    fn custom_flag(&self, stack: &ItemStack, key: &str) -> Option<bool>;

    /// Semantic categories the stack belongs to.
    fn categories(&self, stack: &ItemStack) -> ItemCategories;

    /// Same kind and same auxiliary data.
    fn same_item_same_data(&self, a: &ItemStack, b: &ItemStack) -> bool {
        a.item == b.item && a.data == b.data
    }

    fn is_stackable(&self, stack: &ItemStack) -> bool {
        self.max_stack_size(stack.item) > 1
    }
}

/// Item category used by category rules.
///
/// A stack may belong to several categories at once (a sword is both a
/// `Weapon` and a `MeleeWeapon`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    Elytra,
    Shield,
    Tool,
    Weapon,
    MeleeWeapon,
    RangedWeapon,
    UtilityTool,
    FishingRod,
    Bucket,
    EnchantedBook,
    Totem,
    BlockItem,
    SpawnEgg,
    Arrow,
    Food,
    Potion,
    Trinket,
}

impl ItemCategory {
    pub const fn flag(self) -> ItemCategories {
        match self {
            Self::Helmet => ItemCategories::HELMET,
            Self::Chestplate => ItemCategories::CHESTPLATE,
            Self::Leggings => ItemCategories::LEGGINGS,
            Self::Boots => ItemCategories::BOOTS,
            Self::Elytra => ItemCategories::ELYTRA,
            Self::Shield => ItemCategories::SHIELD,
            Self::Tool => ItemCategories::TOOL,
            Self::Weapon => ItemCategories::WEAPON,
            Self::MeleeWeapon => ItemCategories::MELEE_WEAPON,
            Self::RangedWeapon => ItemCategories::RANGED_WEAPON,
            Self::UtilityTool => ItemCategories::UTILITY_TOOL,
            Self::FishingRod => ItemCategories::FISHING_ROD,
            Self::Bucket => ItemCategories::BUCKET,
            Self::EnchantedBook => ItemCategories::ENCHANTED_BOOK,
            Self::Totem => ItemCategories::TOTEM,
            Self::BlockItem => ItemCategories::BLOCK_ITEM,
            Self::SpawnEgg => ItemCategories::SPAWN_EGG,
            Self::Arrow => ItemCategories::ARROW,
            Self::Food => ItemCategories::FOOD,
            Self::Potion => ItemCategories::POTION,
            Self::Trinket => ItemCategories::TRINKET,
        }
    }
}

bitflags! {
    /// Set of [`ItemCategory`] values reported for a stack.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ItemCategories: u32 {
        const HELMET         = 1 << 0;
        const CHESTPLATE     = 1 << 1;
        const LEGGINGS       = 1 << 2;
        const BOOTS          = 1 << 3;
        const ELYTRA         = 1 << 4;
        const SHIELD         = 1 << 5;
        const TOOL           = 1 << 6;
        const WEAPON         = 1 << 7;
        const MELEE_WEAPON   = 1 << 8;
        const RANGED_WEAPON  = 1 << 9;
        const UTILITY_TOOL   = 1 << 10;
        const FISHING_ROD    = 1 << 11;
        const BUCKET         = 1 << 12;
        const ENCHANTED_BOOK = 1 << 13;
        const TOTEM          = 1 << 14;
        const BLOCK_ITEM     = 1 << 15;
        const SPAWN_EGG      = 1 << 16;
        const ARROW          = 1 << 17;
        const FOOD           = 1 << 18;
        const POTION         = 1 << 19;
        const TRINKET        = 1 << 20;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ItemCategories {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ItemCategories {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

impl ItemCategories {
    /// Categories contained in this set.
    pub fn categories(self) -> impl Iterator<Item = ItemCategory> {
        use strum::IntoEnumIterator;
        ItemCategory::iter().filter(move |category| self.contains(category.flag()))
    }
}

/// Registered item kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub id: Identifier,
    pub max_stack: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: ItemCategories,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Identifier>,
}

impl ItemDefinition {
    pub fn new(handle: ItemHandle, id: Identifier, max_stack: u16) -> Self {
        Self {
            handle,
            id,
            max_stack,
            categories: ItemCategories::empty(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_categories(mut self, categories: ItemCategories) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Identifier) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Registered auxiliary data blob with its boolean custom flags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataDefinition {
    pub handle: DataHandle,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: BTreeMap<String, bool>,
}
