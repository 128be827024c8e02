//! Item system - tools, crop produce and seeds

use crate::registry::RegistryKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum stack size for stackable items.
pub const DEFAULT_STACK_SIZE: u32 = 64;

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    /// A tool (hoe, pickaxe, ...)
    Tool(ToolType, ToolMaterial),
    /// Wheat (harvested produce)
    Wheat,
    /// Wheat seeds
    WheatSeeds,
    /// Carrot (produce and seed)
    Carrot,
    /// Potato (produce and seed)
    Potato,
    /// Poisonous potato (rare potato drop)
    PoisonousPotato,
    /// Beetroot (produce)
    Beetroot,
    /// Beetroot seeds
    BeetrootSeeds,
    /// Nether wart (produce and seed)
    NetherWart,
    /// Cocoa beans (produce and seed)
    CocoaBeans,
    /// Any other item, identified by a numeric id
    Item(u16),
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolType {
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Sword - combat weapon
    Sword,
    /// Hoe - tills farmland and triggers area harvesting
    Hoe,
}

/// Tool material tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolMaterial {
    /// Wooden tools
    Wood,
    /// Stone tools
    Stone,
    /// Iron tools
    Iron,
    /// Golden tools
    Gold,
    /// Diamond tools
    Diamond,
    /// Netherite tools
    Netherite,
}

/// Error returned when an item key does not name a known item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseItemError {
    /// The key was not a valid registry key.
    #[error(transparent)]
    Key(#[from] crate::registry::RegistryKeyError),
    /// The key is well-formed but names no known item.
    #[error("unknown item `{0}`")]
    Unknown(String),
}

impl ToolMaterial {
    /// Every material tier, weakest first.
    pub const ALL: [ToolMaterial; 6] = [
        ToolMaterial::Wood,
        ToolMaterial::Stone,
        ToolMaterial::Iron,
        ToolMaterial::Gold,
        ToolMaterial::Diamond,
        ToolMaterial::Netherite,
    ];

    /// Key prefix used in item names (`wooden_hoe`, `golden_hoe`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            ToolMaterial::Wood => "wooden",
            ToolMaterial::Stone => "stone",
            ToolMaterial::Iron => "iron",
            ToolMaterial::Gold => "golden",
            ToolMaterial::Diamond => "diamond",
            ToolMaterial::Netherite => "netherite",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.prefix() == prefix)
    }
}

impl ToolType {
    /// Every tool type.
    pub const ALL: [ToolType; 5] = [
        ToolType::Pickaxe,
        ToolType::Axe,
        ToolType::Shovel,
        ToolType::Sword,
        ToolType::Hoe,
    ];

    /// Key suffix used in item names.
    pub fn suffix(self) -> &'static str {
        match self {
            ToolType::Pickaxe => "pickaxe",
            ToolType::Axe => "axe",
            ToolType::Shovel => "shovel",
            ToolType::Sword => "sword",
            ToolType::Hoe => "hoe",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.suffix() == suffix)
    }
}

impl ItemType {
    /// True for a hoe of any material tier.
    pub fn is_hoe(self) -> bool {
        matches!(self, ItemType::Tool(ToolType::Hoe, _))
    }

    /// Maximum stack size for this item type.
    pub fn max_stack_size(self) -> u32 {
        match self {
            ItemType::Tool(_, _) => 1, // Tools don't stack
            _ => DEFAULT_STACK_SIZE,
        }
    }

    /// Registry key naming this item.
    pub fn key(self) -> RegistryKey {
        match self {
            ItemType::Tool(tool, material) => {
                RegistryKey::vanilla(&format!("{}_{}", material.prefix(), tool.suffix()))
            }
            ItemType::Item(id) => RegistryKey::vanilla(&format!("item_{id}")),
            other => RegistryKey::vanilla(other.simple_path()),
        }
    }

    /// Resolve a registry key to an item.
    pub fn from_key(key: &RegistryKey) -> Result<Self, ParseItemError> {
        let unknown = || ParseItemError::Unknown(key.to_string());
        if !key.is_vanilla() {
            return Err(unknown());
        }
        let path = key.path();

        let simple = match path {
            "wheat" => Some(ItemType::Wheat),
            "wheat_seeds" => Some(ItemType::WheatSeeds),
            "carrot" => Some(ItemType::Carrot),
            "potato" => Some(ItemType::Potato),
            "poisonous_potato" => Some(ItemType::PoisonousPotato),
            "beetroot" => Some(ItemType::Beetroot),
            "beetroot_seeds" => Some(ItemType::BeetrootSeeds),
            "nether_wart" => Some(ItemType::NetherWart),
            "cocoa_beans" => Some(ItemType::CocoaBeans),
            _ => None,
        };
        if let Some(item) = simple {
            return Ok(item);
        }

        if let Some(id) = path.strip_prefix("item_") {
            return id.parse().map(ItemType::Item).map_err(|_| unknown());
        }

        let (prefix, suffix) = path.split_once('_').ok_or_else(unknown)?;
        match (ToolMaterial::from_prefix(prefix), ToolType::from_suffix(suffix)) {
            (Some(material), Some(tool)) => Ok(ItemType::Tool(tool, material)),
            _ => Err(unknown()),
        }
    }

    fn simple_path(self) -> &'static str {
        match self {
            ItemType::Wheat => "wheat",
            ItemType::WheatSeeds => "wheat_seeds",
            ItemType::Carrot => "carrot",
            ItemType::Potato => "potato",
            ItemType::PoisonousPotato => "poisonous_potato",
            ItemType::Beetroot => "beetroot",
            ItemType::BeetrootSeeds => "beetroot_seeds",
            ItemType::NetherWart => "nether_wart",
            ItemType::CocoaBeans => "cocoa_beans",
            ItemType::Tool(_, _) | ItemType::Item(_) => "item",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ItemType {
    type Err = ParseItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = RegistryKey::parse(s)?;
        Self::from_key(&key)
    }
}

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack
    pub count: u32,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_type: ItemType, count: u32) -> Self {
        Self { item_type, count }
    }

    /// Maximum stack size for this item type
    pub fn max_stack_size(&self) -> u32 {
        self.item_type.max_stack_size()
    }

    /// Check if this stack can merge with another stack.
    pub fn can_merge(&self, other: &ItemStack) -> bool {
        self.item_type == other.item_type && self.max_stack_size() > 1
    }

    /// Check if this stack is at max capacity.
    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack_size()
    }

    /// Remaining space in this stack.
    pub fn remaining_space(&self) -> u32 {
        self.max_stack_size().saturating_sub(self.count)
    }

    /// Add items to this stack, returning the amount that didn't fit.
    pub fn add(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.remaining_space());
        self.count += added;
        amount - added
    }

    /// Remove items from this stack, returning the amount actually removed.
    pub fn remove(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Check if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
