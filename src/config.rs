use anyhow::{Context, Result};
use autoharvest_core::{BlockPos, ItemStack, ItemType};
use autoharvest_world::{CropType, Hand, InteractAction};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A single harvest scenario: a field, a player and one interaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    pub field: FieldConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub click: ClickConfig,
    #[serde(default)]
    pub drops: DropsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    /// Position of the clicked block.
    pub center: [i32; 3],
    /// Three rows of three `key[@age]` cells; row `i` is `dx = i - 1`.
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    /// Eye position; defaults to two blocks south of the clicked block.
    pub position: Option<[f64; 3]>,
    /// Hotbar slot used as the main hand.
    pub selected_slot: usize,
    pub inventory: Vec<SlotConfig>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "player".to_string(),
            position: None,
            selected_slot: 0,
            inventory: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlotConfig {
    pub slot: usize,
    /// Item key, e.g. `wheat_seeds` or `minecraft:iron_hoe`.
    pub item: String,
    #[serde(default = "one")]
    pub count: u32,
}

impl SlotConfig {
    pub fn stack(&self) -> Result<ItemStack> {
        let item: ItemType = self
            .item
            .parse()
            .with_context(|| format!("invalid item in slot {}", self.slot))?;
        Ok(ItemStack::new(item, self.count))
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionConfig {
    RightClickBlock,
    RightClickAir,
    LeftClickBlock,
    LeftClickAir,
    Physical,
}

impl From<ActionConfig> for InteractAction {
    fn from(action: ActionConfig) -> Self {
        match action {
            ActionConfig::RightClickBlock => InteractAction::RightClickBlock,
            ActionConfig::RightClickAir => InteractAction::RightClickAir,
            ActionConfig::LeftClickBlock => InteractAction::LeftClickBlock,
            ActionConfig::LeftClickAir => InteractAction::LeftClickAir,
            ActionConfig::Physical => InteractAction::Physical,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandConfig {
    Main,
    Off,
}

impl From<HandConfig> for Hand {
    fn from(hand: HandConfig) -> Self {
        match hand {
            HandConfig::Main => Hand::Main,
            HandConfig::Off => Hand::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClickConfig {
    pub action: ActionConfig,
    pub hand: HandConfig,
    /// Clicked block; defaults to the field centre.
    pub target: Option<[i32; 3]>,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            action: ActionConfig::RightClickBlock,
            hand: HandConfig::Main,
            target: None,
        }
    }
}

/// Which drop table the scenario uses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropsConfig {
    /// Vanilla loot rules with a seeded RNG.
    Vanilla {
        #[serde(default)]
        seed: u64,
    },
    /// Fixed drops per crop.
    Fixed { entries: Vec<FixedDropConfig> },
}

impl Default for DropsConfig {
    fn default() -> Self {
        DropsConfig::Vanilla { seed: 0 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixedDropConfig {
    /// Crop block name, e.g. `wheat` or `nether_wart`.
    pub crop: String,
    pub item: String,
    #[serde(default = "one")]
    pub count: u32,
}

impl FixedDropConfig {
    pub fn resolve(&self) -> Result<(CropType, ItemStack)> {
        let name = self.crop.strip_prefix("minecraft:").unwrap_or(&self.crop);
        let crop = CropType::from_block_name(name)
            .with_context(|| format!("unknown crop `{}` in fixed drops", self.crop))?;
        let item: ItemType = self
            .item
            .parse()
            .with_context(|| format!("invalid item for crop `{}`", self.crop))?;
        Ok((crop, ItemStack::new(item, self.count)))
    }
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn center(&self) -> BlockPos {
        BlockPos::from(self.field.center)
    }

    pub fn target(&self) -> BlockPos {
        self.click.target.map_or_else(|| self.center(), BlockPos::from)
    }

    pub fn player_position(&self) -> [f64; 3] {
        self.player.position.unwrap_or_else(|| {
            let [x, y, z] = self.center().center();
            [x, y + 1.12, z - 2.0]
        })
    }

    /// Override the vanilla drop seed (no effect on fixed drops).
    pub fn with_drop_seed(mut self, seed: u64) -> Self {
        if let DropsConfig::Vanilla { seed: current } = &mut self.drops {
            *current = seed;
        }
        self
    }
}
