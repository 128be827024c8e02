//! Items dropped into the world.
//!
//! Harvest drops that don't fit into the player's inventory are spawned at
//! the centre of the block they came from.

use autoharvest_core::{BlockPos, ItemStack, ItemType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dropped item entity in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedItem {
    /// Unique ID for this dropped item.
    pub id: u64,
    /// World X position.
    pub x: f64,
    /// World Y position.
    pub y: f64,
    /// World Z position.
    pub z: f64,
    /// The dropped stack.
    pub stack: ItemStack,
}

impl DroppedItem {
    /// Create a dropped item at the centre of `pos`.
    pub fn at_block(id: u64, pos: BlockPos, stack: ItemStack) -> Self {
        let [x, y, z] = pos.center();
        Self { id, x, y, z, stack }
    }

    /// Block the item is currently inside.
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

/// Manages all dropped items in the world.
///
/// IDs are assigned sequentially and items are kept in a `BTreeMap` so
/// iteration order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ItemManager {
    items: BTreeMap<u64, DroppedItem>,
    next_id: u64,
}

impl ItemManager {
    /// Create a new empty item manager.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Spawn `stack` at the centre of `pos`. Returns the new item's ID.
    pub fn spawn(&mut self, pos: BlockPos, stack: ItemStack) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        tracing::trace!(id, %pos, item = %stack.item_type, count = stack.count, "spawned dropped item");
        self.items.insert(id, DroppedItem::at_block(id, pos, stack));
        id
    }

    /// Look up a dropped item by ID.
    pub fn get(&self, id: u64) -> Option<&DroppedItem> {
        self.items.get(&id)
    }

    /// Remove a dropped item, returning it.
    pub fn remove(&mut self, id: u64) -> Option<DroppedItem> {
        self.items.remove(&id)
    }

    /// All dropped items in spawn order.
    pub fn items(&self) -> impl Iterator<Item = &DroppedItem> {
        self.items.values()
    }

    /// Total count of `item` lying on the ground.
    pub fn count_item(&self, item: ItemType) -> u32 {
        self.items
            .values()
            .filter(|d| d.stack.item_type == item)
            .map(|d| d.stack.count)
            .sum()
    }

    /// Number of dropped item entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are lying on the ground.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
