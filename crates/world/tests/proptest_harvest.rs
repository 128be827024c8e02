//! Property-based tests for area harvesting
//!
//! Validates engine invariants over arbitrary 3×3 fields:
//! - Cells that are not mature crops are never touched
//! - Every harvested cell ends up either at age 0 or cleared to air
//! - Seeds are conserved: what leaves the inventory went into the ground
//! - Disallowed held items leave everything untouched

use autoharvest_core::{BlockPos, ItemStack, ItemType, ToolMaterial};
use autoharvest_testkit::FixedDrops;
use autoharvest_world::{
    BlockKind, BlockState, CellOutcome, CropType, HarvestDecisionEngine, HeldItem, Inventory,
    Neighborhood, OFFSETS,
};
use proptest::prelude::*;

const CENTER: BlockPos = BlockPos::new(0, 64, 0);

fn crop_type() -> impl Strategy<Value = CropType> {
    prop::sample::select(CropType::ALL.to_vec())
}

fn cell() -> impl Strategy<Value = BlockState> {
    prop_oneof![
        2 => Just(BlockState::AIR),
        1 => Just(BlockState::simple(BlockKind::Stone)),
        1 => Just(BlockState::simple(BlockKind::Farmland)),
        1 => crop_type().prop_map(|crop| BlockState::simple(BlockKind::Crop(crop))),
        6 => crop_type().prop_flat_map(|crop| {
            (0..=crop.max_age()).prop_map(move |age| BlockState::crop(crop, age))
        }),
    ]
}

fn field() -> impl Strategy<Value = Neighborhood> {
    (prop::array::uniform9(cell()), crop_type(), any::<bool>()).prop_map(
        |(mut cells, center_crop, mature)| {
            // The clicked block is always a crop so the engine runs.
            let age = if mature { center_crop.max_age() } else { 0 };
            cells[4] = BlockState::crop(center_crop, age);
            Neighborhood::from_cells(CENTER, cells)
        },
    )
}

fn seed_inventory(seeds: &[(ItemType, u32)]) -> Inventory {
    let mut inventory = Inventory::new();
    for (item, count) in seeds {
        if *count > 0 {
            inventory.add_item(ItemStack::new(*item, *count));
        }
    }
    inventory
}

fn seed_counts() -> impl Strategy<Value = Vec<(ItemType, u32)>> {
    let seeds: Vec<ItemType> = CropType::ALL.iter().filter_map(|c| c.seed()).collect();
    prop::collection::vec(0u32..4, seeds.len())
        .prop_map(move |counts| seeds.iter().copied().zip(counts).collect())
}

fn is_mature_crop(state: &BlockState) -> bool {
    state.crop_type().is_some() && state.ageable.is_some_and(|a| a.is_mature())
}

proptest! {
    /// Property: only mature crops change
    #[test]
    fn non_mature_cells_are_untouched(hood in field(), seeds in seed_counts()) {
        let before = hood.clone();
        let mut after = hood;
        let mut inventory = seed_inventory(&seeds);

        let report = HarvestDecisionEngine::new().process(
            &HeldItem::Empty,
            &mut after,
            &mut inventory,
            &mut FixedDrops::none(),
        );

        let mature = before.cells().iter().filter(|c| is_mature_crop(c)).count() as u32;
        prop_assert_eq!(report.result.harvested_count, mature);
        prop_assert!(report.result.replanted_count <= report.result.harvested_count);

        for (((dx, dz), old), outcome) in before.iter().zip(&report.outcomes) {
            let new = after.get(dx, dz).copied().unwrap_or_default();
            prop_assert_eq!(outcome.offset, (dx, dz));
            match outcome.outcome() {
                CellOutcome::Skipped => {
                    prop_assert!(!is_mature_crop(old));
                    prop_assert_eq!(new, *old);
                }
                CellOutcome::Replanted => {
                    prop_assert_eq!(new, old.reset_age());
                    prop_assert_eq!(new.ageable.map(|a| a.age), Some(0));
                }
                CellOutcome::Cleared => prop_assert!(new.is_air()),
            }
        }
    }

    /// Property: every seed taken from the inventory was planted
    #[test]
    fn seeds_are_conserved(hood in field(), seeds in seed_counts()) {
        let mut after = hood.clone();
        let mut inventory = seed_inventory(&seeds);

        let report = HarvestDecisionEngine::new().process(
            &HeldItem::Hoe(ToolMaterial::Iron),
            &mut after,
            &mut inventory,
            &mut FixedDrops::none(),
        );

        for (item, before) in &seeds {
            let planted = report
                .outcomes
                .iter()
                .filter(|o| o.replanted)
                .filter_map(|o| hood.get(o.offset.0, o.offset.1))
                .filter(|state| state.crop_type().and_then(CropType::seed) == Some(*item))
                .count() as u32;
            prop_assert_eq!(inventory.count_item(*item) + planted, *before);
        }
        prop_assert!(report.spills.is_empty());
    }

    /// Property: items other than a hoe never trigger a harvest
    #[test]
    fn disallowed_items_change_nothing(
        hood in field(),
        held in prop_oneof![
            Just(ItemType::WheatSeeds),
            Just(ItemType::Carrot),
            Just(ItemType::Item(17)),
        ],
    ) {
        let mut after = hood.clone();
        let mut inventory = seed_inventory(&[(ItemType::WheatSeeds, 5)]);
        let inventory_before = inventory.clone();
        let mut drops = FixedDrops::none().with(CropType::Wheat, ItemType::Wheat, 1);

        let report = HarvestDecisionEngine::new().process(
            &HeldItem::Other(held),
            &mut after,
            &mut inventory,
            &mut drops,
        );

        prop_assert_eq!(after, hood);
        prop_assert_eq!(inventory, inventory_before);
        prop_assert_eq!(report.result.harvested_count, 0);
        prop_assert!(report.feedback.is_none());
        prop_assert_eq!(drops.calls(), 0);
    }
}

#[test]
fn offsets_cover_the_square_once() {
    let mut seen: Vec<(i32, i32)> = OFFSETS.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 9);
    assert!(seen.iter().all(|(dx, dz)| dx.abs() <= 1 && dz.abs() <= 1));
}
