//! Drop tables for harvested crops.
//!
//! The engine never decides what a crop drops; it asks a [`DropTable`].
//! [`VanillaDrops`] follows the usual crop loot rules with a seeded RNG so
//! runs are reproducible.

use crate::block::BlockState;
use crate::crop::CropType;
use crate::harvest::HeldItem;
use autoharvest_core::{ItemStack, ItemType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Computes the items a block drops when broken with `held`.
pub trait DropTable {
    /// Items dropped by `cell`. An empty list means nothing drops.
    fn compute_drops(&mut self, cell: &BlockState, held: &HeldItem) -> Vec<ItemStack>;
}

impl<F> DropTable for F
where
    F: FnMut(&BlockState, &HeldItem) -> Vec<ItemStack>,
{
    fn compute_drops(&mut self, cell: &BlockState, held: &HeldItem) -> Vec<ItemStack> {
        self(cell, held)
    }
}

/// Bonus rolls made for extra seeds/produce on a mature crop.
const BONUS_ROLLS: u32 = 3;

/// Chance of each bonus roll succeeding (4/7).
const BONUS_NUMERATOR: u32 = 4;
const BONUS_DENOMINATOR: u32 = 7;

/// Chance of a mature potato also dropping a poisonous potato (1/50).
const POISONOUS_DENOMINATOR: u32 = 50;

/// Vanilla-style crop drops. The held tool does not change yields.
pub struct VanillaDrops {
    rng: StdRng,
}

impl VanillaDrops {
    /// Create a drop table with a fixed RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn bonus(&mut self) -> u32 {
        (0..BONUS_ROLLS)
            .filter(|_| self.rng.gen_ratio(BONUS_NUMERATOR, BONUS_DENOMINATOR))
            .count() as u32
    }

    fn mature_drops(&mut self, crop: CropType) -> Vec<ItemStack> {
        let mut drops = match crop {
            CropType::Wheat => vec![
                ItemStack::new(ItemType::Wheat, 1),
                ItemStack::new(ItemType::WheatSeeds, self.bonus()),
            ],
            CropType::Carrots => vec![ItemStack::new(ItemType::Carrot, 1 + self.bonus())],
            CropType::Potatoes => {
                let mut drops = vec![ItemStack::new(ItemType::Potato, 1 + self.bonus())];
                if self.rng.gen_ratio(1, POISONOUS_DENOMINATOR) {
                    drops.push(ItemStack::new(ItemType::PoisonousPotato, 1));
                }
                drops
            }
            CropType::Beetroots => vec![
                ItemStack::new(ItemType::Beetroot, 1),
                ItemStack::new(ItemType::BeetrootSeeds, 1 + self.bonus()),
            ],
            CropType::NetherWart => {
                vec![ItemStack::new(ItemType::NetherWart, self.rng.gen_range(2..=4))]
            }
            CropType::Cocoa => vec![ItemStack::new(ItemType::CocoaBeans, 3)],
        };
        drops.retain(|stack| !stack.is_empty());
        drops
    }
}

impl DropTable for VanillaDrops {
    fn compute_drops(&mut self, cell: &BlockState, _held: &HeldItem) -> Vec<ItemStack> {
        let Some(crop) = cell.crop_type() else {
            return Vec::new();
        };
        match cell.ageable {
            Some(a) if a.is_mature() => self.mature_drops(crop),
            _ => crop
                .seed()
                .map(|seed| vec![ItemStack::new(seed, 1)])
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;

    fn total(drops: &[ItemStack], item: ItemType) -> u32 {
        drops
            .iter()
            .filter(|s| s.item_type == item)
            .map(|s| s.count)
            .sum()
    }

    #[test]
    fn mature_wheat_drops_one_wheat_and_up_to_three_seeds() {
        let mut table = VanillaDrops::new(7);
        for _ in 0..100 {
            let drops = table.compute_drops(&BlockState::mature(CropType::Wheat), &HeldItem::Empty);
            assert_eq!(total(&drops, ItemType::Wheat), 1);
            assert!(total(&drops, ItemType::WheatSeeds) <= 3);
            assert!(drops.iter().all(|s| s.count > 0));
        }
    }

    #[test]
    fn mature_nether_wart_drops_two_to_four() {
        let mut table = VanillaDrops::new(99);
        for _ in 0..100 {
            let drops =
                table.compute_drops(&BlockState::mature(CropType::NetherWart), &HeldItem::Empty);
            let wart = total(&drops, ItemType::NetherWart);
            assert!((2..=4).contains(&wart));
        }
    }

    #[test]
    fn cocoa_always_drops_three_beans() {
        let mut table = VanillaDrops::new(0);
        let drops = table.compute_drops(&BlockState::mature(CropType::Cocoa), &HeldItem::Empty);
        assert_eq!(drops, vec![ItemStack::new(ItemType::CocoaBeans, 3)]);
    }

    #[test]
    fn immature_crop_drops_its_seed() {
        let mut table = VanillaDrops::new(0);
        let drops = table.compute_drops(&BlockState::crop(CropType::Beetroots, 1), &HeldItem::Empty);
        assert_eq!(drops, vec![ItemStack::new(ItemType::BeetrootSeeds, 1)]);
    }

    #[test]
    fn non_crops_drop_nothing() {
        let mut table = VanillaDrops::new(0);
        let drops = table.compute_drops(&BlockState::simple(BlockKind::Stone), &HeldItem::Empty);
        assert!(drops.is_empty());
    }

    #[test]
    fn same_seed_same_drops() {
        let mut a = VanillaDrops::new(1234);
        let mut b = VanillaDrops::new(1234);
        for crop in CropType::ALL {
            let cell = BlockState::mature(crop);
            assert_eq!(
                a.compute_drops(&cell, &HeldItem::Empty),
                b.compute_drops(&cell, &HeldItem::Empty)
            );
        }
    }

    #[test]
    fn closures_are_drop_tables() {
        let mut table = |_: &BlockState, _: &HeldItem| vec![ItemStack::new(ItemType::Wheat, 2)];
        let drops = table.compute_drops(&BlockState::mature(CropType::Wheat), &HeldItem::Empty);
        assert_eq!(drops, vec![ItemStack::new(ItemType::Wheat, 2)]);
    }
}
