//! In-memory farm world: sparse block storage plus dropped items.

use crate::block::{BlockKind, BlockState, ParseBlockError};
use crate::crop::CropType;
use crate::drop_item::ItemManager;
use crate::harvest::Spill;
use crate::neighborhood::{Neighborhood, OFFSETS};
use autoharvest_core::BlockPos;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error returned when a text layout of the 3×3 layer is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Layouts have exactly three rows.
    #[error("expected 3 rows, got {0}")]
    RowCount(usize),
    /// Each row has exactly three cells.
    #[error("row {row} has {cells} cells, expected 3")]
    CellCount {
        /// Row index (0 = `dx = -1`).
        row: usize,
        /// Number of cells found.
        cells: usize,
    },
    /// A cell could not be parsed.
    #[error("cell ({dx}, {dz}): {source}")]
    Block {
        /// Row offset.
        dx: i32,
        /// Column offset.
        dz: i32,
        /// Parse failure.
        source: ParseBlockError,
    },
}

/// Block storage keyed by position. Positions that were never set are air.
#[derive(Debug, Clone, Default)]
pub struct FarmWorld {
    blocks: BTreeMap<BlockPos, BlockState>,
    items: ItemManager,
}

impl FarmWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            blocks: BTreeMap::new(),
            items: ItemManager::new(),
        }
    }

    /// Block at `pos`.
    pub fn get_block(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    /// Set the block at `pos`. Setting air removes the entry.
    pub fn set_block(&mut self, pos: BlockPos, state: BlockState) {
        if state.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    /// Place a crop at `age` on top of farmland.
    pub fn place_crop(&mut self, pos: BlockPos, crop: CropType, age: u8) {
        self.set_block(
            pos.offset(0, -1, 0),
            BlockState::simple(BlockKind::Farmland),
        );
        self.set_block(pos, BlockState::crop(crop, age));
    }

    /// Snapshot of the 3×3 layer around `center`.
    pub fn neighborhood(&self, center: BlockPos) -> Neighborhood {
        let cells = OFFSETS.map(|(dx, dz)| self.get_block(center.offset(dx, 0, dz)));
        Neighborhood::from_cells(center, cells)
    }

    /// Write every cell of `hood` back into the world.
    pub fn apply_neighborhood(&mut self, hood: &Neighborhood) {
        for ((dx, dz), state) in hood.iter() {
            self.set_block(hood.position(dx, dz), *state);
        }
    }

    /// Fill the 3×3 layer around `center` from a text layout.
    ///
    /// `rows[dx + 1]` holds the cells for `dz = -1, 0, 1`, separated by
    /// whitespace, each in `key[@age]` form (`wheat@7`, `air`, `carrots`).
    /// Ageable crops are placed on farmland. Nothing is written unless the
    /// whole layout parses.
    pub fn load_layer<S: AsRef<str>>(
        &mut self,
        center: BlockPos,
        rows: &[S],
    ) -> Result<(), LayoutError> {
        if rows.len() != 3 {
            return Err(LayoutError::RowCount(rows.len()));
        }

        let mut parsed = Vec::with_capacity(9);
        for (row, (dx, text)) in (-1..=1).zip(rows).enumerate() {
            let text: &str = text.as_ref();
            let cells: Vec<&str> = text.split_whitespace().collect();
            if cells.len() != 3 {
                return Err(LayoutError::CellCount {
                    row,
                    cells: cells.len(),
                });
            }
            for (dz, cell) in (-1..=1).zip(cells) {
                let state: BlockState = cell
                    .parse()
                    .map_err(|source| LayoutError::Block { dx, dz, source })?;
                parsed.push((center.offset(dx, 0, dz), state));
            }
        }

        for (pos, state) in parsed {
            match (state.crop_type(), state.ageable) {
                (Some(crop), Some(a)) => self.place_crop(pos, crop, a.age),
                _ => self.set_block(pos, state),
            }
        }
        Ok(())
    }

    /// Render the 3×3 layer around `center` in the layout
    /// [`FarmWorld::load_layer`] accepts.
    pub fn render_layer(&self, center: BlockPos) -> Vec<String> {
        let hood = self.neighborhood(center);
        hood.cells()
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Drop leftover items at the block they came from.
    pub fn spill(&mut self, spill: Spill) -> u64 {
        self.items.spawn(spill.pos, spill.stack)
    }

    /// Items lying on the ground.
    pub fn dropped_items(&self) -> &ItemManager {
        &self.items
    }

    /// Number of non-air blocks stored.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoharvest_core::{ItemStack, ItemType};

    #[test]
    fn unset_blocks_are_air() {
        let world = FarmWorld::new();
        assert!(world.get_block(BlockPos::new(5, 5, 5)).is_air());
    }

    #[test]
    fn place_crop_adds_farmland_below() {
        let mut world = FarmWorld::new();
        let pos = BlockPos::new(0, 64, 0);
        world.place_crop(pos, CropType::Wheat, 3);

        assert_eq!(world.get_block(pos), BlockState::crop(CropType::Wheat, 3));
        assert_eq!(
            world.get_block(pos.offset(0, -1, 0)).kind,
            BlockKind::Farmland
        );
    }

    #[test]
    fn neighborhood_round_trips_through_world() {
        let mut world = FarmWorld::new();
        let center = BlockPos::new(10, 64, 10);
        world.place_crop(center.offset(-1, 0, 1), CropType::Carrots, 7);
        world.place_crop(center, CropType::Carrots, 2);

        let mut hood = world.neighborhood(center);
        assert_eq!(hood.get(-1, 1), Some(&BlockState::mature(CropType::Carrots)));

        hood.set(-1, 1, BlockState::AIR);
        world.apply_neighborhood(&hood);
        assert!(world.get_block(center.offset(-1, 0, 1)).is_air());
        assert_eq!(world.get_block(center), BlockState::crop(CropType::Carrots, 2));
    }

    #[test]
    fn setting_air_frees_storage() {
        let mut world = FarmWorld::new();
        let pos = BlockPos::default();
        world.set_block(pos, BlockState::simple(BlockKind::Stone));
        assert_eq!(world.block_count(), 1);
        world.set_block(pos, BlockState::AIR);
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn layer_round_trips_through_text() {
        let mut world = FarmWorld::new();
        let center = BlockPos::new(0, 64, 0);
        let rows = ["wheat@7 air carrots@3", "stone wheat@7 wheat", "air air beetroots@3"];
        world.load_layer(center, &rows).unwrap();

        assert_eq!(world.render_layer(center), rows.to_vec());
        assert_eq!(
            world.get_block(center.offset(-1, -1, -1)).kind,
            BlockKind::Farmland
        );
        // A crop without age is stored as-is, with nothing below it.
        assert!(world.get_block(center.offset(0, -1, 1)).is_air());
    }

    #[test]
    fn malformed_layers_are_rejected_whole() {
        let mut world = FarmWorld::new();
        let center = BlockPos::default();

        assert_eq!(
            world.load_layer(center, &["air air air"]),
            Err(LayoutError::RowCount(1))
        );
        assert_eq!(
            world.load_layer(center, &["wheat@7 air air", "air air", "air air air"]),
            Err(LayoutError::CellCount { row: 1, cells: 2 })
        );
        assert!(matches!(
            world.load_layer(center, &["wheat@7 air air", "air air air", "air pumpkin air"]),
            Err(LayoutError::Block { dx: 1, dz: 0, .. })
        ));
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn spill_spawns_item_at_block() {
        let mut world = FarmWorld::new();
        let id = world.spill(Spill {
            pos: BlockPos::new(1, 64, 1),
            stack: ItemStack::new(ItemType::Potato, 4),
        });
        let item = world.dropped_items().get(id).unwrap();
        assert_eq!((item.x, item.y, item.z), (1.5, 64.5, 1.5));
        assert_eq!(world.dropped_items().count_item(ItemType::Potato), 4);
    }
}
