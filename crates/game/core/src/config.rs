//! Death-handling parameters and fixed engine constants.
//!
//! [`DeathConfig`] is a plain value. Hosts keep the live copy behind a
//! reloadable handle and pass a borrowed snapshot into every decision, so a
//! reload takes effect on the next call without any cached state.
use crate::env::ItemCategory;
use crate::preservation::Decision;

/// Full parameter set for preservation and recovery.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeathConfig {
    /// Put preserved items back into the slot they occupied before death.
    pub restore_slots: bool,
    pub preservation: PreservationConfig,
    pub randomizer: RandomizerConfig,
    pub marker: MarkerConfig,
    pub lists: ListConfig,
    pub item_types: ItemTypeConfig,
    pub features: FeatureConfig,
    pub recovery: RecoveryConfig,
}

impl DeathConfig {
    // ===== fixed engine constants =====
    /// Ticks between safe-position samples for a grounded actor.
    pub const SAFE_POS_UPDATE_TICKS: u64 = 10;
    /// Entries kept in each actor's safe-position history.
    pub const HISTORY_CAPACITY: usize = 12;
    /// Blocks below the minimum build height at which an item counts as lost.
    pub const VOID_TRIGGER_OFFSET: f64 = 8.0;
    /// Deaths this close above the void trigger get an immediate recovery pass.
    pub const NEAR_VOID_DEATH_MARGIN: f64 = 8.0;
    /// Horizontal radius searched around a blocked history or stored point.
    pub const PERTURB_RADIUS: i32 = 3;
    pub const NEAREST_SEARCH_HORIZONTAL: i32 = 16;
    pub const NEAREST_SEARCH_VERTICAL: i32 = 20;
    pub const SPAWN_SEARCH_HORIZONTAL: i32 = 8;
    pub const SPAWN_SEARCH_VERTICAL: i32 = 20;
    /// Items recovered fewer than this many ticks ago are left alone.
    pub const RECOVERY_DEBOUNCE_TICKS: u64 = 2;
    /// Pickup immunity granted after a teleport.
    pub const RECOVERY_PICKUP_DELAY: u32 = 20;

    pub fn new() -> Self {
        Self {
            restore_slots: true,
            preservation: PreservationConfig::default(),
            randomizer: RandomizerConfig::default(),
            marker: MarkerConfig::default(),
            lists: ListConfig::default(),
            item_types: ItemTypeConfig::default(),
            features: FeatureConfig::default(),
            recovery: RecoveryConfig::default(),
        }
    }

    /// Clamps every ranged value into its accepted range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.randomizer = self.randomizer.sanitized();
        self.recovery = self.recovery.sanitized();
        self
    }
}

impl Default for DeathConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Master switch for the preservation chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreservationConfig {
    pub enabled: bool,
}

impl Default for PreservationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Per-unit random keep chance for stacks no other rule decided.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomizerConfig {
    pub enabled: bool,
    /// Base chance in percent, 0..=100.
    pub chance_percent: u32,
    /// Extra percent per luck point, 0..=100.
    pub luck_additive: u32,
    /// Multiplier applied to the base chance per luck point, 0.0..=10.0.
    pub luck_multiplier: f64,
}

impl RandomizerConfig {
    pub const MAX_PERCENT: u32 = 100;
    pub const MAX_LUCK_MULTIPLIER: f64 = 10.0;

    #[must_use]
    pub fn sanitized(self) -> Self {
        let luck_multiplier = if self.luck_multiplier.is_nan() {
            Self::default().luck_multiplier
        } else {
            self.luck_multiplier.clamp(0.0, Self::MAX_LUCK_MULTIPLIER)
        };
        Self {
            enabled: self.enabled,
            chance_percent: self.chance_percent.min(Self::MAX_PERCENT),
            luck_additive: self.luck_additive.min(Self::MAX_PERCENT),
            luck_multiplier,
        }
    }
}

impl Default for RandomizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            chance_percent: 25,
            luck_additive: 20,
            luck_multiplier: 1.0,
        }
    }
}

/// Boolean custom-data flag that forces a verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkerConfig {
    pub enabled: bool,
    pub key: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key: "Soulbound".to_owned(),
        }
    }
}

/// Raw manual lists. Entries are `namespace:path` strings resolved against
/// the item oracle when a configuration snapshot is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    pub always_preserved_items: Vec<String>,
    pub always_preserved_tags: Vec<String>,
    pub always_dropped_items: Vec<String>,
    pub always_dropped_tags: Vec<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            always_preserved_items: Vec::new(),
            always_preserved_tags: vec!["lenientdeath:safe".to_owned()],
            always_dropped_items: Vec::new(),
            always_dropped_tags: Vec::new(),
        }
    }
}

/// Category-based rules consulted by the item classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemTypeConfig {
    pub enabled: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rules: CategoryRules,
}

impl Default for ItemTypeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rules: CategoryRules::default(),
        }
    }
}

/// One verdict per item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CategoryRules {
    pub helmets: Decision,
    pub chestplates: Decision,
    pub leggings: Decision,
    pub boots: Decision,
    pub elytras: Decision,
    pub shields: Decision,
    pub tools: Decision,
    pub weapons: Decision,
    pub melee_weapons: Decision,
    pub ranged_weapons: Decision,
    pub utility_tools: Decision,
    pub fishing_rods: Decision,
    pub buckets: Decision,
    pub enchanted_books: Decision,
    pub totems: Decision,
    pub block_items: Decision,
    pub spawn_eggs: Decision,
    pub arrows: Decision,
    pub food: Decision,
    pub potions: Decision,
    pub trinkets: Decision,
}

impl CategoryRules {
    pub const fn decision_for(&self, category: ItemCategory) -> Decision {
        match category {
            ItemCategory::Helmet => self.helmets,
            ItemCategory::Chestplate => self.chestplates,
            ItemCategory::Leggings => self.leggings,
            ItemCategory::Boots => self.boots,
            ItemCategory::Elytra => self.elytras,
            ItemCategory::Shield => self.shields,
            ItemCategory::Tool => self.tools,
            ItemCategory::Weapon => self.weapons,
            ItemCategory::MeleeWeapon => self.melee_weapons,
            ItemCategory::RangedWeapon => self.ranged_weapons,
            ItemCategory::UtilityTool => self.utility_tools,
            ItemCategory::FishingRod => self.fishing_rods,
            ItemCategory::Bucket => self.buckets,
            ItemCategory::EnchantedBook => self.enchanted_books,
            ItemCategory::Totem => self.totems,
            ItemCategory::BlockItem => self.block_items,
            ItemCategory::SpawnEgg => self.spawn_eggs,
            ItemCategory::Arrow => self.arrows,
            ItemCategory::Food => self.food,
            ItemCategory::Potion => self.potions,
            ItemCategory::Trinket => self.trinkets,
        }
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        use Decision::{Ignore, Preserve};
        Self {
            helmets: Preserve,
            chestplates: Preserve,
            leggings: Preserve,
            boots: Preserve,
            elytras: Preserve,
            shields: Preserve,
            tools: Preserve,
            weapons: Preserve,
            melee_weapons: Ignore,
            ranged_weapons: Ignore,
            utility_tools: Ignore,
            fishing_rods: Ignore,
            buckets: Ignore,
            enchanted_books: Ignore,
            totems: Ignore,
            block_items: Ignore,
            spawn_eggs: Ignore,
            arrows: Ignore,
            food: Preserve,
            potions: Preserve,
            trinkets: Preserve,
        }
    }
}

/// Optional behaviours layered on top of preservation and recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatureConfig {
    /// Tell the respawned actor where they died.
    pub death_coordinates: bool,
    /// Death drops become invulnerable and never despawn.
    pub item_resilience: bool,
    /// Hand death drops to the host's owner-marker capability.
    pub owner_marker: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            death_coordinates: true,
            item_resilience: true,
            owner_marker: true,
        }
    }
}

/// Which dropped items the per-tick recovery scan considers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RecoveryScope {
    #[default]
    DeathDropsOnly,
    AllDrops,
}

/// Void and hazard recovery switches plus rate-limit parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecoveryConfig {
    pub void_enabled: bool,
    pub hazard_enabled: bool,
    pub scope: RecoveryScope,
    pub window_ticks: u32,
    pub max_recoveries: u32,
    pub cooldown_ticks: u32,
}

impl RecoveryConfig {
    pub const MAX_WINDOW_TICKS: u32 = 1200;
    pub const MAX_RECOVERIES: u32 = 100;
    pub const MAX_COOLDOWN_TICKS: u32 = 1200;

    /// Whether any recovery trigger is switched on.
    pub const fn any_enabled(&self) -> bool {
        self.void_enabled || self.hazard_enabled
    }

    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            window_ticks: self.window_ticks.clamp(1, Self::MAX_WINDOW_TICKS),
            max_recoveries: self.max_recoveries.clamp(1, Self::MAX_RECOVERIES),
            cooldown_ticks: self.cooldown_ticks.clamp(1, Self::MAX_COOLDOWN_TICKS),
            ..self
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            void_enabled: true,
            hazard_enabled: true,
            scope: RecoveryScope::DeathDropsOnly,
            window_ticks: 10,
            max_recoveries: 3,
            cooldown_ticks: 10,
        }
    }
}
