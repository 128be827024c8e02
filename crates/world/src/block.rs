//! Block states as seen by the harvest engine.
//!
//! A block is a [`BlockKind`] plus optional growth metadata. Growth metadata
//! is a capability: only blocks that expose an [`Ageable`] pair can mature.

use crate::crop::CropType;
use autoharvest_core::RegistryKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of block occupying a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Empty space.
    #[default]
    Air,
    /// Tilled soil.
    Farmland,
    /// Untilled dirt.
    Dirt,
    /// Stone.
    Stone,
    /// A crop from the fixed crop set.
    Crop(CropType),
    /// Any other block, by numeric id.
    Other(u16),
}

/// Current and maximum growth stage of an ageable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ageable {
    /// Current growth stage.
    pub age: u8,
    /// Final growth stage.
    pub max_age: u8,
}

impl Ageable {
    /// Fully grown only at exactly `max_age`.
    pub fn is_mature(&self) -> bool {
        self.age == self.max_age
    }
}

/// Snapshot of one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    /// Block kind.
    pub kind: BlockKind,
    /// Growth metadata, present only on ageable blocks.
    pub ageable: Option<Ageable>,
}

/// Error returned when a block description cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBlockError {
    /// Not a valid registry key.
    #[error(transparent)]
    Key(#[from] autoharvest_core::RegistryKeyError),
    /// The key names no known block.
    #[error("unknown block `{0}`")]
    Unknown(String),
    /// The `@age` suffix was not a number.
    #[error("invalid age `{0}`")]
    InvalidAge(String),
}

impl BlockState {
    /// Air.
    pub const AIR: BlockState = BlockState {
        kind: BlockKind::Air,
        ageable: None,
    };

    /// A plain block without growth metadata.
    pub fn simple(kind: BlockKind) -> Self {
        Self {
            kind,
            ageable: None,
        }
    }

    /// A crop at `age`, using the crop's own maximum age.
    pub fn crop(crop: CropType, age: u8) -> Self {
        Self {
            kind: BlockKind::Crop(crop),
            ageable: Some(Ageable {
                age,
                max_age: crop.max_age(),
            }),
        }
    }

    /// A fully grown crop.
    pub fn mature(crop: CropType) -> Self {
        Self::crop(crop, crop.max_age())
    }

    /// Crop type of this block, if it is one of the known crops.
    pub fn crop_type(&self) -> Option<CropType> {
        match self.kind {
            BlockKind::Crop(crop) => Some(crop),
            _ => None,
        }
    }

    /// Whether the block exposes an age/max-age pair.
    pub fn is_ageable(&self) -> bool {
        self.ageable.is_some()
    }

    /// Whether the block is air.
    pub fn is_air(&self) -> bool {
        self.kind == BlockKind::Air
    }

    /// The same block with its age set to zero.
    ///
    /// Non-ageable blocks are returned unchanged.
    pub fn reset_age(self) -> Self {
        Self {
            ageable: self.ageable.map(|a| Ageable { age: 0, ..a }),
            ..self
        }
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            BlockKind::Air => "air".to_string(),
            BlockKind::Farmland => "farmland".to_string(),
            BlockKind::Dirt => "dirt".to_string(),
            BlockKind::Stone => "stone".to_string(),
            BlockKind::Crop(crop) => crop.block_name().to_string(),
            BlockKind::Other(id) => format!("block_{id}"),
        };
        match self.ageable {
            Some(a) => write!(f, "{name}@{}", a.age),
            None => write!(f, "{name}"),
        }
    }
}

/// Parses `key[@age]`, e.g. `wheat@7`, `minecraft:carrots@0`, `farmland`.
///
/// A crop written without `@age` has no growth metadata.
impl FromStr for BlockState {
    type Err = ParseBlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (key, age) = match s.split_once('@') {
            Some((key, age)) => {
                let age: u8 = age
                    .trim()
                    .parse()
                    .map_err(|_| ParseBlockError::InvalidAge(age.to_string()))?;
                (key, Some(age))
            }
            None => (s, None),
        };

        let key = RegistryKey::parse(key)?;
        let unknown = || ParseBlockError::Unknown(key.to_string());
        if !key.is_vanilla() {
            return Err(unknown());
        }

        let kind = match key.path() {
            "air" => BlockKind::Air,
            "farmland" => BlockKind::Farmland,
            "dirt" => BlockKind::Dirt,
            "stone" => BlockKind::Stone,
            path => match CropType::from_block_name(path) {
                Some(crop) => BlockKind::Crop(crop),
                None => match path.strip_prefix("block_").map(str::parse) {
                    Some(Ok(id)) => BlockKind::Other(id),
                    _ => return Err(unknown()),
                },
            },
        };

        let ageable = match (kind, age) {
            (BlockKind::Crop(crop), Some(age)) => Some(Ageable {
                age,
                max_age: crop.max_age(),
            }),
            (_, Some(age)) => Some(Ageable { age, max_age: age }),
            (_, None) => None,
        };

        Ok(BlockState { kind, ageable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_is_strict_equality() {
        assert!(Ageable { age: 7, max_age: 7 }.is_mature());
        assert!(!Ageable { age: 6, max_age: 7 }.is_mature());
        assert!(!Ageable { age: 8, max_age: 7 }.is_mature());
    }

    #[test]
    fn test_reset_age_keeps_kind_and_max() {
        let state = BlockState::mature(CropType::Beetroots).reset_age();
        assert_eq!(state, BlockState::crop(CropType::Beetroots, 0));
        assert_eq!(state.ageable.unwrap().max_age, 3);
    }

    #[test]
    fn test_reset_age_ignores_plain_blocks() {
        let dirt = BlockState::simple(BlockKind::Dirt);
        assert_eq!(dirt.reset_age(), dirt);
    }

    #[test]
    fn test_parse_crop_with_age() {
        let state: BlockState = "wheat@7".parse().unwrap();
        assert_eq!(state, BlockState::mature(CropType::Wheat));
        assert_eq!(state.to_string(), "wheat@7");
    }

    #[test]
    fn test_parse_crop_without_age_is_not_ageable() {
        let state: BlockState = "minecraft:cocoa".parse().unwrap();
        assert_eq!(state.crop_type(), Some(CropType::Cocoa));
        assert!(!state.is_ageable());
    }

    #[test]
    fn test_parse_plain_blocks() {
        assert_eq!("air".parse::<BlockState>().unwrap(), BlockState::AIR);
        assert_eq!(
            "block_12".parse::<BlockState>().unwrap(),
            BlockState::simple(BlockKind::Other(12))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "wheat@seven".parse::<BlockState>(),
            Err(ParseBlockError::InvalidAge(_))
        ));
        assert!(matches!(
            "pumpkin_stem@7".parse::<BlockState>(),
            Err(ParseBlockError::Unknown(_))
        ));
    }
}
