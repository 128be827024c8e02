//! Player interaction handling for area harvesting.
//!
//! [`AutoHarvestListener`] is the entry point the host calls for every
//! block interaction. It decides whether the interaction should become an
//! area harvest and, if so, runs the engine and applies the results.

use crate::drops::DropTable;
use crate::harvest::{HarvestDecisionEngine, HarvestReport, HeldItem};
use crate::inventory::{Inventory, HOTBAR_SIZE};
use crate::world::FarmWorld;
use autoharvest_audio::SoundEvent;
use autoharvest_core::{BlockPos, ItemStack};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Kind of interaction the player performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractAction {
    /// Use on a block.
    RightClickBlock,
    /// Use on nothing.
    RightClickAir,
    /// Attack a block.
    LeftClickBlock,
    /// Attack nothing.
    LeftClickAir,
    /// Stepping on a pressure plate, trampling farmland, ...
    Physical,
}

/// Hand used for the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hand {
    /// Main hand.
    Main,
    /// Off hand.
    Off,
}

/// An interaction dispatched by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInteractEvent {
    /// What the player did.
    pub action: InteractAction,
    /// Which hand did it.
    pub hand: Hand,
    /// Block the player targeted, if any.
    pub clicked_block: Option<BlockPos>,
    /// Set when a handler consumed the interaction.
    pub cancelled: bool,
}

impl PlayerInteractEvent {
    /// Main-hand right click on `pos`.
    pub fn right_click(pos: BlockPos) -> Self {
        Self {
            action: InteractAction::RightClickBlock,
            hand: Hand::Main,
            clicked_block: Some(pos),
            cancelled: false,
        }
    }
}

/// The interacting player.
#[derive(Debug, Clone)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Eye position in world space.
    pub position: [f64; 3],
    /// Inventory; the first [`HOTBAR_SIZE`] slots are the hotbar.
    pub inventory: Inventory,
    /// Selected hotbar slot (main hand).
    pub selected_slot: usize,
    /// Chat messages sent to the player.
    pub messages: Vec<String>,
    /// Sounds played to the player.
    pub sounds: Vec<SoundEvent>,
}

impl Player {
    /// New player with an empty inventory and the first hotbar slot selected.
    pub fn new(name: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            position,
            inventory: Inventory::new(),
            selected_slot: 0,
            messages: Vec::new(),
            sounds: Vec::new(),
        }
    }

    /// Select a hotbar slot. Out-of-range slots are ignored.
    pub fn select_slot(&mut self, slot: usize) {
        if slot < HOTBAR_SIZE {
            self.selected_slot = slot;
        }
    }

    /// Stack in the main hand.
    pub fn main_hand(&self) -> Option<&ItemStack> {
        self.inventory.get(self.selected_slot)
    }

    /// Put `stack` into the main hand, replacing whatever was there.
    pub fn set_main_hand(&mut self, stack: Option<ItemStack>) {
        self.inventory.set(self.selected_slot, stack);
    }
}

/// Turns qualifying crop interactions into area harvests.
pub struct AutoHarvestListener<D> {
    engine: HarvestDecisionEngine,
    drops: D,
}

impl<D: DropTable> AutoHarvestListener<D> {
    /// Create a listener using `drops` to decide crop drops.
    pub fn new(drops: D) -> Self {
        info!("auto-harvest enabled (3x3, empty hand or hoe)");
        Self {
            engine: HarvestDecisionEngine::new(),
            drops,
        }
    }

    /// Handle an interaction.
    ///
    /// Returns `None` and leaves the event untouched unless the player
    /// right-clicked a known crop with the main hand while holding nothing
    /// or a hoe. Otherwise the event is cancelled, the area is harvested and
    /// the report is returned.
    pub fn on_player_interact(
        &mut self,
        event: &mut PlayerInteractEvent,
        world: &mut FarmWorld,
        player: &mut Player,
    ) -> Option<HarvestReport> {
        if event.action != InteractAction::RightClickBlock || event.hand != Hand::Main {
            return None;
        }
        let clicked = event.clicked_block?;
        world.get_block(clicked).crop_type()?;

        let held = HeldItem::from_stack(player.main_hand());
        if !held.permits_harvest() {
            debug!(player = %player.name, ?held, "held item does not allow area harvest");
            return None;
        }

        event.cancelled = true;

        let mut hood = world.neighborhood(clicked);
        let report = self
            .engine
            .process(&held, &mut hood, &mut player.inventory, &mut self.drops);
        world.apply_neighborhood(&hood);

        for spill in &report.spills {
            world.spill(spill.clone());
        }

        if let Some(feedback) = &report.feedback {
            player
                .sounds
                .push(SoundEvent::at(feedback.sound, player.position));
            player.messages.push(feedback.message.clone());
        }

        info!(
            player = %player.name,
            %clicked,
            harvested = report.result.harvested_count,
            replanted = report.result.replanted_count,
            spilled = report.spills.len(),
            "area harvest"
        );
        Some(report)
    }

    /// The drop table in use.
    pub fn drops(&self) -> &D {
        &self.drops
    }
}
