//! Player inventory.
//!
//! Provides a 36-slot inventory with stack merging, leftover reporting and
//! first-slot-wins removal.

use autoharvest_core::{ItemStack, ItemType};
use serde::{Deserialize, Serialize};

/// Number of slots in player inventory.
pub const INVENTORY_SIZE: usize = 36;

/// Number of hotbar slots (the first slots of the inventory).
pub const HOTBAR_SIZE: usize = 9;

/// Player inventory with a fixed number of ordered slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: [Option<ItemStack>; INVENTORY_SIZE],
}

impl Serialize for Inventory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(INVENTORY_SIZE))?;
        for slot in &self.slots {
            seq.serialize_element(slot)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let slots: Vec<Option<ItemStack>> = Vec::deserialize(deserializer)?;
        let len = slots.len();
        let slots: [Option<ItemStack>; INVENTORY_SIZE] = slots.try_into().map_err(|_| {
            serde::de::Error::custom(format!("expected {INVENTORY_SIZE} slots, got {len}"))
        })?;
        Ok(Inventory { slots })
    }
}

impl Inventory {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Get a mutable reference to an item stack in a slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Set an item stack in a slot. Returns false for out-of-range slots.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = stack.filter(|s| !s.is_empty());
                true
            }
            None => false,
        }
    }

    /// Take an item stack from a slot, leaving it empty.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot)?.take()
    }

    /// Iterate over all slots in order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&ItemStack>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Try to add an item stack to the inventory, merging with existing stacks first.
    /// Returns the remaining items that couldn't fit (if any).
    pub fn add_item(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        if stack.is_empty() {
            return None;
        }

        // First pass: top up existing stacks.
        for existing in self.slots.iter_mut().flatten() {
            if existing.can_merge(&stack) && !existing.is_full() {
                stack.count = existing.add(stack.count);
                if stack.count == 0 {
                    return None;
                }
            }
        }

        // Second pass: fill empty slots, one max-size stack at a time.
        let max = stack.max_stack_size();
        for slot in &mut self.slots {
            if slot.is_none() {
                let placed = stack.count.min(max);
                *slot = Some(ItemStack::new(stack.item_type, placed));
                stack.count -= placed;
                if stack.count == 0 {
                    return None;
                }
            }
        }

        Some(stack)
    }

    /// Remove up to `amount` of an item, scanning slots in order.
    /// Returns the actual amount removed.
    pub fn remove_item(&mut self, item: ItemType, amount: u32) -> u32 {
        let mut remaining = amount;

        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }

            if let Some(stack) = slot {
                if stack.item_type == item {
                    remaining -= stack.remove(remaining);
                    if stack.is_empty() {
                        *slot = None;
                    }
                }
            }
        }

        amount - remaining
    }

    /// Remove exactly one unit of `item` from the first slot holding it.
    ///
    /// The slot is decremented, or cleared when it held a single unit.
    /// Returns false if no slot holds the item.
    pub fn remove_one(&mut self, item: ItemType) -> bool {
        let Some(index) = self.find_item(item) else {
            return false;
        };
        let slot = &mut self.slots[index];
        let emptied = match slot.as_mut() {
            Some(stack) => {
                stack.remove(1);
                stack.is_empty()
            }
            None => true,
        };
        if emptied {
            *slot = None;
        }
        true
    }

    /// Count the total number of a specific item in the inventory.
    pub fn count_item(&self, item: ItemType) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item_type == item)
            .map(|stack| stack.count)
            .sum()
    }

    /// Check if the inventory contains at least `amount` of an item.
    pub fn contains(&self, item: ItemType, amount: u32) -> bool {
        self.count_item(item) >= amount
    }

    /// Find the first slot containing a specific item.
    pub fn find_item(&self, item: ItemType) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.item_type == item))
    }

    /// Get the number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Check if the inventory is completely empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if the inventory is completely full.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
