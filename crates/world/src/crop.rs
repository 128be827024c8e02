//! Crop types and the crop → seed table.

use autoharvest_core::ItemType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Type of crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropType {
    Wheat,
    Carrots,
    Potatoes,
    Beetroots,
    NetherWart,
    Cocoa,
}

/// Item used to replant each crop. Built once, never mutated.
static SEED_MAP: LazyLock<HashMap<CropType, ItemType>> = LazyLock::new(|| {
    HashMap::from([
        (CropType::Wheat, ItemType::WheatSeeds),
        (CropType::Carrots, ItemType::Carrot),
        (CropType::Potatoes, ItemType::Potato),
        (CropType::Beetroots, ItemType::BeetrootSeeds),
        (CropType::NetherWart, ItemType::NetherWart),
        (CropType::Cocoa, ItemType::CocoaBeans),
    ])
});

impl CropType {
    /// Every known crop.
    pub const ALL: [CropType; 6] = [
        CropType::Wheat,
        CropType::Carrots,
        CropType::Potatoes,
        CropType::Beetroots,
        CropType::NetherWart,
        CropType::Cocoa,
    ];

    /// Get the final growth stage for this crop
    pub fn max_age(self) -> u8 {
        match self {
            CropType::Wheat | CropType::Carrots | CropType::Potatoes => 7,
            CropType::Beetroots | CropType::NetherWart => 3,
            CropType::Cocoa => 2,
        }
    }

    /// Item consumed to replant this crop.
    pub fn seed(self) -> Option<ItemType> {
        SEED_MAP.get(&self).copied()
    }

    /// Block name used in registry keys.
    pub fn block_name(self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Carrots => "carrots",
            CropType::Potatoes => "potatoes",
            CropType::Beetroots => "beetroots",
            CropType::NetherWart => "nether_wart",
            CropType::Cocoa => "cocoa",
        }
    }

    /// Get crop type from a block name
    pub fn from_block_name(name: &str) -> Option<CropType> {
        Self::ALL.into_iter().find(|c| c.block_name() == name)
    }
}
