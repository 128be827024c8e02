//! Area harvesting: harvest and replant every mature crop in a 3×3 area.
//!
//! [`HarvestDecisionEngine::process`] walks the neighbourhood in a fixed
//! order. Seeds are taken from the inventory as cells are replanted, so an
//! early cell can use up the seed a later cell would have needed.

use crate::block::BlockState;
use crate::drops::DropTable;
use crate::inventory::Inventory;
use crate::neighborhood::{Neighborhood, OFFSETS};
use autoharvest_audio::SoundId;
use autoharvest_core::{BlockPos, ItemStack, ItemType, ToolMaterial, ToolType};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// What the player is holding in the main hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeldItem {
    /// Nothing held.
    Empty,
    /// A hoe of any tier.
    Hoe(ToolMaterial),
    /// Anything else.
    Other(ItemType),
}

impl HeldItem {
    /// Classify the contents of a hand slot.
    pub fn from_stack(stack: Option<&ItemStack>) -> Self {
        match stack {
            None => HeldItem::Empty,
            Some(stack) if stack.is_empty() => HeldItem::Empty,
            Some(stack) => match stack.item_type {
                ItemType::Tool(ToolType::Hoe, material) => HeldItem::Hoe(material),
                other => HeldItem::Other(other),
            },
        }
    }

    /// Whether area harvesting may be triggered with this item.
    pub fn permits_harvest(&self) -> bool {
        matches!(self, HeldItem::Empty | HeldItem::Hoe(_))
    }
}

/// Per-cell classification of what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOutcome {
    /// Not a mature known crop; left untouched.
    Skipped,
    /// Harvested and reset to age 0.
    Replanted,
    /// Harvested and cleared to air (no seed available).
    Cleared,
}

/// Result for one cell of the neighbourhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestOutcome {
    /// Offset `(dx, dz)` from the clicked block.
    pub offset: (i32, i32),
    /// Whether the cell was harvested.
    pub harvested: bool,
    /// Items the cell dropped.
    pub drops: Vec<ItemStack>,
    /// Whether the cell was replanted.
    pub replanted: bool,
}

impl HarvestOutcome {
    fn skipped(offset: (i32, i32)) -> Self {
        Self {
            offset,
            harvested: false,
            drops: Vec::new(),
            replanted: false,
        }
    }

    /// Collapse the flags into a [`CellOutcome`].
    pub fn outcome(&self) -> CellOutcome {
        match (self.harvested, self.replanted) {
            (false, _) => CellOutcome::Skipped,
            (true, true) => CellOutcome::Replanted,
            (true, false) => CellOutcome::Cleared,
        }
    }
}

/// Aggregate counters for one activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Number of cells harvested.
    pub harvested_count: u32,
    /// Number of harvested cells that were replanted.
    pub replanted_count: u32,
}

/// Items that did not fit into the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spill {
    /// Block the items came from.
    pub pos: BlockPos,
    /// The leftover stack.
    pub stack: ItemStack,
}

/// Sound and chat message to present to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Sound to play.
    pub sound: SoundId,
    /// Message to show.
    pub message: String,
}

impl Feedback {
    fn for_result(result: &OperationResult) -> Self {
        Self {
            sound: SoundId::CropBreak,
            message: format!(
                "Harvested {}. Replanted: {}.",
                result.harvested_count, result.replanted_count
            ),
        }
    }
}

/// Everything produced by one activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestReport {
    /// Aggregate counters.
    pub result: OperationResult,
    /// One entry per cell, in processing order.
    pub outcomes: Vec<HarvestOutcome>,
    /// Leftover drops to place in the world.
    pub spills: Vec<Spill>,
    /// Present only when at least one cell was harvested.
    pub feedback: Option<Feedback>,
}

impl HarvestReport {
    fn empty() -> Self {
        Self {
            result: OperationResult::default(),
            outcomes: OFFSETS
                .into_iter()
                .map(HarvestOutcome::skipped)
                .collect(),
            spills: Vec::new(),
            feedback: None,
        }
    }
}

/// Decides which crops in a 3×3 area are harvested and replanted.
///
/// The engine holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarvestDecisionEngine;

impl HarvestDecisionEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Harvest every mature crop in `hood`, replanting where seeds allow.
    ///
    /// `hood` and `inventory` are updated in place. If the clicked block is
    /// not a known crop or `held` is neither empty nor a hoe, nothing is
    /// touched and an empty report is returned.
    pub fn process<D: DropTable + ?Sized>(
        &self,
        held: &HeldItem,
        hood: &mut Neighborhood,
        inventory: &mut Inventory,
        drops: &mut D,
    ) -> HarvestReport {
        if hood.center_state().crop_type().is_none() || !held.permits_harvest() {
            trace!(center = %hood.center(), ?held, "area harvest preconditions not met");
            return HarvestReport::empty();
        }

        let mut report = HarvestReport::empty();

        for (outcome, (dx, dz)) in report.outcomes.iter_mut().zip(OFFSETS) {
            let Some(cell) = hood.get(dx, dz).copied() else {
                continue;
            };
            let Some(crop) = cell.crop_type() else {
                continue;
            };
            let Some(ageable) = cell.ageable else {
                trace!(dx, dz, ?crop, "crop has no age, skipping");
                continue;
            };
            if !ageable.is_mature() {
                trace!(dx, dz, ?crop, age = ageable.age, "crop not mature");
                continue;
            }

            let pos = hood.position(dx, dz);
            let dropped = drops.compute_drops(&cell, held);
            for stack in &dropped {
                if let Some(leftover) = inventory.add_item(stack.clone()) {
                    debug!(%pos, item = %leftover.item_type, count = leftover.count, "inventory full, spilling");
                    report.spills.push(Spill {
                        pos,
                        stack: leftover,
                    });
                }
            }

            outcome.harvested = true;
            outcome.drops = dropped;
            report.result.harvested_count += 1;

            let replanted = crop
                .seed()
                .is_some_and(|seed| inventory.contains(seed, 1) && inventory.remove_one(seed));
            if replanted {
                hood.set(dx, dz, cell.reset_age());
                outcome.replanted = true;
                report.result.replanted_count += 1;
            } else {
                hood.set(dx, dz, BlockState::AIR);
            }
            debug!(%pos, ?crop, replanted, "harvested crop");
        }

        if report.result.harvested_count > 0 {
            report.feedback = Some(Feedback::for_result(&report.result));
        }
        report
    }
}
