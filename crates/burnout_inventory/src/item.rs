//! Item definitions

use serde::Deserialize;

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Consumables (potions, stims, etc.)
    Consumable,
    /// Equipment pieces
    Equipment,
    /// Special items
    Special,
    /// Key items (floor pass). Tracked by the key counter, never a slot.
    Key,
}

impl Default for ItemCategory {
    fn default() -> Self {
        Self::Consumable
    }
}

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Default for ItemRarity {
    fn default() -> Self {
        Self::Common
    }
}

fn default_max_stack() -> u32 {
    1
}

fn default_buy_price() -> u32 {
    100
}

fn default_sell_price() -> u32 {
    50
}

/// Static, shared definition of an item kind.
///
/// Stock entries hold this behind an `Arc` and never mutate it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Icon path
    #[serde(default)]
    pub icon: String,
    /// Category
    #[serde(default)]
    pub category: ItemCategory,
    /// Rarity
    #[serde(default)]
    pub rarity: ItemRarity,
    /// Maximum stack size (1 = not stackable). Informational only.
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    /// Whether using the item consumes one unit
    #[serde(default)]
    pub consumable: bool,
    /// Lifetime of each acquired batch in seconds (0 = never expires)
    #[serde(default)]
    pub duration: f32,
    /// Shop buy price
    #[serde(default = "default_buy_price")]
    pub buy_price: u32,
    /// Shop sell price
    #[serde(default = "default_sell_price")]
    pub sell_price: u32,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            category: ItemCategory::default(),
            rarity: ItemRarity::default(),
            max_stack: default_max_stack(),
            consumable: false,
            duration: 0.0,
            buy_price: default_buy_price(),
            sell_price: default_sell_price(),
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set icon path
    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon = path.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set rarity
    pub fn with_rarity(mut self, rarity: ItemRarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack = max.max(1);
        self
    }

    /// Set consumable
    pub fn with_consumable(mut self, consumable: bool) -> Self {
        self.consumable = consumable;
        self
    }

    /// Set batch lifetime in seconds. Negative values are treated as 0.
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Set buy and sell prices
    pub fn with_prices(mut self, buy: u32, sell: u32) -> Self {
        self.buy_price = buy;
        self.sell_price = sell;
        self
    }

    /// Check if stackable
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Check if acquired batches expire
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Check if this kind goes to the key counter
    pub fn is_key(&self) -> bool {
        self.category == ItemCategory::Key
    }
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::new("unknown", "Unknown Item")
    }
}
