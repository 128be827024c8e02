//! Headless scenario runner: builds the world, dispatches one interaction and
//! summarises what happened.

use crate::config::{DropsConfig, Scenario};
use anyhow::{Context, Result};
use autoharvest_audio::SoundId;
use autoharvest_core::ItemStack;
use autoharvest_world::{
    AutoHarvestListener, BlockState, CropType, DropTable, FarmWorld, HeldItem, Player,
    PlayerInteractEvent, VanillaDrops, HOTBAR_SIZE, INVENTORY_SIZE,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Drop table selected by the scenario.
pub enum ScenarioDrops {
    Vanilla(VanillaDrops),
    Fixed(HashMap<CropType, Vec<ItemStack>>),
}

impl ScenarioDrops {
    pub fn from_config(config: &DropsConfig) -> Result<Self> {
        match config {
            DropsConfig::Vanilla { seed } => Ok(ScenarioDrops::Vanilla(VanillaDrops::new(*seed))),
            DropsConfig::Fixed { entries } => {
                let mut table: HashMap<CropType, Vec<ItemStack>> = HashMap::new();
                for entry in entries {
                    let (crop, stack) = entry.resolve()?;
                    table.entry(crop).or_default().push(stack);
                }
                Ok(ScenarioDrops::Fixed(table))
            }
        }
    }
}

impl DropTable for ScenarioDrops {
    fn compute_drops(&mut self, cell: &BlockState, held: &HeldItem) -> Vec<ItemStack> {
        match self {
            ScenarioDrops::Vanilla(vanilla) => vanilla.compute_drops(cell, held),
            ScenarioDrops::Fixed(table) => cell
                .crop_type()
                .and_then(|crop| table.get(&crop).cloned())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotSummary {
    pub slot: usize,
    pub item: String,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct DroppedSummary {
    pub item: String,
    pub count: u32,
    pub position: [f64; 3],
}

/// Outcome of running a scenario.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    /// Whether the interaction was turned into an area harvest.
    pub intercepted: bool,
    pub harvested: u32,
    pub replanted: u32,
    pub message: Option<String>,
    pub sound: Option<SoundId>,
    pub field_before: Vec<String>,
    pub field_after: Vec<String>,
    pub inventory: Vec<SlotSummary>,
    pub dropped: Vec<DroppedSummary>,
}

/// Build the scenario's world and player, then dispatch its interaction.
pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioReport> {
    let center = scenario.center();

    let mut world = FarmWorld::new();
    world
        .load_layer(center, scenario.field.rows.as_slice())
        .context("invalid field layout")?;

    let mut player = Player::new(scenario.player.name.clone(), scenario.player_position());
    anyhow::ensure!(
        scenario.player.selected_slot < HOTBAR_SIZE,
        "selected_slot must be below {HOTBAR_SIZE}"
    );
    player.select_slot(scenario.player.selected_slot);
    for slot in &scenario.player.inventory {
        anyhow::ensure!(
            slot.slot < INVENTORY_SIZE,
            "inventory slot {} out of range (0..{INVENTORY_SIZE})",
            slot.slot
        );
        player.inventory.set(slot.slot, Some(slot.stack()?));
    }

    let drops = ScenarioDrops::from_config(&scenario.drops)?;
    let mut listener = AutoHarvestListener::new(drops);

    let mut event = PlayerInteractEvent {
        action: scenario.click.action.into(),
        hand: scenario.click.hand.into(),
        clicked_block: Some(scenario.target()),
        cancelled: false,
    };

    let field_before = world.render_layer(center);
    let report = listener.on_player_interact(&mut event, &mut world, &mut player);
    info!(intercepted = report.is_some(), cancelled = event.cancelled, "scenario finished");

    let result = report.as_ref().map(|r| r.result).unwrap_or_default();
    let feedback = report.as_ref().and_then(|r| r.feedback.as_ref());

    Ok(ScenarioReport {
        intercepted: report.is_some(),
        harvested: result.harvested_count,
        replanted: result.replanted_count,
        message: feedback.map(|f| f.message.clone()),
        sound: feedback.map(|f| f.sound),
        field_before,
        field_after: world.render_layer(center),
        inventory: player
            .inventory
            .slots()
            .enumerate()
            .filter_map(|(slot, stack)| {
                stack.map(|s| SlotSummary {
                    slot,
                    item: s.item_type.to_string(),
                    count: s.count,
                })
            })
            .collect(),
        dropped: world
            .dropped_items()
            .items()
            .map(|d| DroppedSummary {
                item: d.stack.item_type.to_string(),
                count: d.stack.count,
                position: [d.x, d.y, d.z],
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(toml: &str) -> Scenario {
        Scenario::from_toml(toml).unwrap()
    }

    #[test]
    fn fixed_drops_scenario_harvests_and_replants() {
        let report = run_scenario(&scenario(
            r#"
[field]
center = [0, 64, 0]
rows = ["wheat@7 air air", "air wheat@7 air", "air air wheat@3"]

[[player.inventory]]
slot = 9
item = "wheat_seeds"
count = 1

[drops]
kind = "fixed"
entries = [{ crop = "wheat", item = "wheat", count = 2 }]
"#,
        ))
        .unwrap();

        assert!(report.intercepted);
        assert_eq!((report.harvested, report.replanted), (2, 1));
        assert_eq!(report.message.as_deref(), Some("Harvested 2. Replanted: 1."));
        assert_eq!(report.sound, Some(SoundId::CropBreak));
        assert_eq!(
            report.field_after,
            vec!["wheat@0 air air", "air air air", "air air wheat@3"]
        );
        assert_eq!(report.inventory.len(), 1);
        assert_eq!(report.inventory[0].item, "minecraft:wheat");
        assert_eq!(report.inventory[0].count, 4);
    }

    #[test]
    fn holding_seeds_is_not_intercepted() {
        let report = run_scenario(&scenario(
            r#"
[field]
center = [0, 64, 0]
rows = ["air air air", "air carrots@7 air", "air air air"]

[[player.inventory]]
slot = 0
item = "carrot"
count = 5
"#,
        ))
        .unwrap();

        assert!(!report.intercepted);
        assert_eq!(report.field_after, report.field_before);
        assert!(report.message.is_none());
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        let err = run_scenario(&scenario(
            r#"
[field]
center = [0, 64, 0]
rows = ["air air air", "air wheat@7 air", "air air air"]

[[player.inventory]]
slot = 36
item = "wheat_seeds"
"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn unknown_crop_in_fixed_drops_is_rejected() {
        let config = DropsConfig::Fixed {
            entries: vec![crate::config::FixedDropConfig {
                crop: "melon".to_string(),
                item: "wheat".to_string(),
                count: 1,
            }],
        };
        assert!(ScenarioDrops::from_config(&config).is_err());
    }
}
