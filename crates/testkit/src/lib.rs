#![warn(missing_docs)]
//! Deterministic fixtures for harvest tests: fixed drop tables, field
//! layouts, snapshot assertions and tracing setup.

mod snapshot;

use anyhow::{Context, Result};
use autoharvest_core::{BlockPos, ItemStack, ItemType};
use autoharvest_world::{BlockState, CropType, DropTable, FarmWorld, HeldItem, Inventory};
use std::collections::HashMap;

pub use snapshot::*;

/// Drop table returning the same stacks every time for each crop type.
///
/// Crops with no configured drops (and non-crops) drop nothing.
#[derive(Debug, Clone, Default)]
pub struct FixedDrops {
    table: HashMap<CropType, Vec<ItemStack>>,
    calls: usize,
}

impl FixedDrops {
    /// Drop table where nothing drops.
    pub fn none() -> Self {
        Self::default()
    }

    /// Add `count` of `item` to what `crop` drops.
    pub fn with(mut self, crop: CropType, item: ItemType, count: u32) -> Self {
        self.table
            .entry(crop)
            .or_default()
            .push(ItemStack::new(item, count));
        self
    }

    /// How many times drops were computed.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl DropTable for FixedDrops {
    fn compute_drops(&mut self, cell: &BlockState, _held: &HeldItem) -> Vec<ItemStack> {
        self.calls += 1;
        cell.crop_type()
            .and_then(|crop| self.table.get(&crop).cloned())
            .unwrap_or_default()
    }
}

/// Build a [`FarmWorld`] whose 3×3 layer around `center` matches `rows`.
///
/// See [`FarmWorld::load_layer`] for the layout format.
pub fn field_from_rows(center: BlockPos, rows: [&str; 3]) -> Result<FarmWorld> {
    let mut world = FarmWorld::new();
    world
        .load_layer(center, &rows)
        .with_context(|| format!("invalid field layout {rows:?}"))?;
    Ok(world)
}

/// Total seeds of `item` held by the inventory and lying on the ground.
pub fn seeds_everywhere(world: &FarmWorld, inventory: &Inventory, item: ItemType) -> u32 {
    inventory.count_item(item) + world.dropped_items().count_item(item)
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_drops_only_for_configured_crops() {
        let mut drops = FixedDrops::none().with(CropType::Wheat, ItemType::Wheat, 1);
        let wheat = drops.compute_drops(&BlockState::mature(CropType::Wheat), &HeldItem::Empty);
        let carrots = drops.compute_drops(&BlockState::mature(CropType::Carrots), &HeldItem::Empty);

        assert_eq!(wheat, vec![ItemStack::new(ItemType::Wheat, 1)]);
        assert!(carrots.is_empty());
        assert_eq!(drops.calls(), 2);
    }

    #[test]
    fn field_from_rows_places_crops_on_farmland() {
        let center = BlockPos::new(0, 64, 0);
        let world = field_from_rows(center, ["wheat@7 air air", "air carrots@2 air", "air air air"]).unwrap();

        assert_eq!(world.get_block(center), BlockState::crop(CropType::Carrots, 2));
        assert_eq!(
            world.get_block(center.offset(0, -1, 0)),
            BlockState::simple(autoharvest_world::BlockKind::Farmland)
        );
    }

    #[test]
    fn field_from_rows_reports_bad_cells() {
        let err = field_from_rows(BlockPos::default(), ["air air pumpkin", "air air air", "air air air"])
            .unwrap_err();
        assert!(format!("{err:#}").contains("pumpkin"));
    }

    #[test]
    fn seeds_everywhere_counts_ground_and_inventory() {
        let mut world = FarmWorld::new();
        world.spill(autoharvest_world::Spill {
            pos: BlockPos::default(),
            stack: ItemStack::new(ItemType::WheatSeeds, 2),
        });
        let mut inventory = Inventory::new();
        inventory.add_item(ItemStack::new(ItemType::WheatSeeds, 3));

        assert_eq!(seeds_everywhere(&world, &inventory, ItemType::WheatSeeds), 5);
    }
}
