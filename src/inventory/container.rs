use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::inventory::stack::ItemStack;
use crate::item::{ItemCatalog, ItemKindId};

/// A fixed-capacity grid of item slots (a bag or quick-bar).
///
/// Slots are stored row-major: linear index `i = row * cols + col`.
/// The slot vec always holds exactly `rows * cols` stacks, and every
/// stack independently satisfies the stack invariant. All access goes
/// through index-checked operations; no long-lived mutable aliases
/// into a slot escape the container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    rows: usize,
    cols: usize,
    slots: Vec<ItemStack>,
}

impl Container {
    /// Creates an empty `rows x cols` container. Both dimensions must
    /// be at least 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "container dimensions must be positive");
        Self { rows, cols, slots: vec![ItemStack::EMPTY; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(InventoryError::IndexOutOfRange { index, capacity: self.slots.len() })
        }
    }

    /// Read-only access to the stack at `index`.
    pub fn get(&self, index: usize) -> Result<&ItemStack> {
        self.check_index(index)?;
        Ok(&self.slots[index])
    }

    /// Writes `stack` only if the target slot is empty. An occupied
    /// target refuses with `SlotOccupied` (an expected "cannot
    /// auto-place" signal, not a fault) and leaves everything
    /// untouched; merging into occupied slots is the organizer's job,
    /// not this primitive's.
    pub fn try_place(&mut self, index: usize, stack: ItemStack) -> Result<()> {
        self.check_index(index)?;
        if !self.slots[index].is_empty() {
            return Err(InventoryError::SlotOccupied { index });
        }
        self.slots[index] = stack;
        Ok(())
    }

    /// Unconditional overwrite. Reserved for the transfer protocol,
    /// which only calls it on slots it has already emptied.
    pub fn force_place(&mut self, index: usize, stack: ItemStack) -> Result<()> {
        self.check_index(index)?;
        self.slots[index] = stack;
        Ok(())
    }

    /// Removes one unit from the slot, returning it as a single-unit
    /// stack. The slot becomes empty when the last unit leaves.
    /// Returns `None` for an empty slot.
    pub fn take_one(&mut self, index: usize) -> Result<Option<ItemStack>> {
        self.check_index(index)?;
        let slot = &mut self.slots[index];
        let Some(kind) = slot.kind else {
            return Ok(None);
        };
        slot.amount -= 1;
        if slot.amount == 0 {
            *slot = ItemStack::EMPTY;
        }
        Ok(Some(ItemStack::new(kind, 1)))
    }

    /// Clears the slot and returns its previous contents (the empty
    /// stack if it already was empty). This primitive has no partial
    /// failure mode, which is what makes the two-container swap atomic.
    pub fn take_all(&mut self, index: usize) -> Result<ItemStack> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.slots[index], ItemStack::EMPTY))
    }

    /// First-fit scan: the lowest empty index wins, deterministically.
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter()
    }

    /// Total units of `kind` across all slots.
    pub fn count_of(&self, kind: ItemKindId) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.kind == Some(kind))
            .map(|s| s.amount)
            .sum()
    }

    /// Changes the grid dimensions. Every stack is re-clamped against
    /// the catalog first, then surviving stacks are re-placed in index
    /// order into the new grid. Non-empty stacks that no longer fit
    /// are returned to the caller, never silently dropped.
    pub fn resize(
        &mut self,
        rows: usize,
        cols: usize,
        catalog: &ItemCatalog,
    ) -> Vec<ItemStack> {
        assert!(rows > 0 && cols > 0, "container dimensions must be positive");
        for slot in &mut self.slots {
            slot.clamp(catalog);
        }

        let mut new_slots = vec![ItemStack::EMPTY; rows * cols];
        let mut displaced = Vec::new();
        let mut next = 0;
        for stack in self.slots.drain(..).filter(|s| !s.is_empty()) {
            if next < new_slots.len() {
                new_slots[next] = stack;
                next += 1;
            } else {
                displaced.push(stack);
            }
        }

        self.rows = rows;
        self.cols = cols;
        self.slots = new_slots;
        displaced
    }

    /// Crate-internal slice access for the organizer, which rewrites
    /// slots in bulk while keeping the per-slot invariant.
    pub(crate) fn slots_mut(&mut self) -> &mut [ItemStack] {
        &mut self.slots
    }
}

/// Handle to a container owned by a [`ContainerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u32);

/// Notification that a container's contents changed during a logical
/// operation. Consumed by the UI host, one redraw per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    ContentsChanged(ContainerId),
}

/// Explicit owner of all containers belonging to one player session.
///
/// Constructed by the session and passed where needed; there is no
/// process-wide registry. Also carries the contents-changed queue:
/// logical operations push exactly one event per touched container,
/// not one per internal write, and the host drains the queue each tick.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: Vec<Container>,
    events: VecDeque<ContainerEvent>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, container: Container) -> ContainerId {
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(container);
        id
    }

    pub fn get(&self, id: ContainerId) -> Result<&Container> {
        self.containers
            .get(id.0 as usize)
            .ok_or(InventoryError::UnknownContainer(id))
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Result<&mut Container> {
        self.containers
            .get_mut(id.0 as usize)
            .ok_or(InventoryError::UnknownContainer(id))
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Queues a contents-changed notification for `id`.
    pub(crate) fn emit_changed(&mut self, id: ContainerId) {
        self.events.push_back(ContainerEvent::ContentsChanged(id));
    }

    /// Drains all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ContainerEvent> + '_ {
        self.events.drain(..)
    }
}
