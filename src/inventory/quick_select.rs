use crate::error::Result;
use crate::inventory::container::{ContainerId, ContainerRegistry};
use crate::inventory::stack::ItemStack;

/// Hotkey-driven selection cursor into one designated container
/// (the quick-bar).
///
/// The host translates raw key events into indices (one key, one
/// index) and calls [`select`](Self::select); gameplay reads the
/// selected stack for held-item preview and consumes units through
/// [`consume_one`](Self::consume_one), which delegates to the
/// container rather than mutating slots privately.
#[derive(Debug)]
pub struct QuickSelect {
    container: ContainerId,
    selected: usize,
}

impl QuickSelect {
    pub fn new(container: ContainerId) -> Self {
        Self { container, selected: 0 }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Moves the cursor to `index`. Out-of-range indices are ignored,
    /// keeping the previous selection.
    pub fn select(&mut self, registry: &ContainerRegistry, index: usize) -> Result<()> {
        let capacity = registry.get(self.container)?.capacity();
        if index < capacity {
            self.selected = index;
        } else {
            log::debug!("quick select index {index} out of range, keeping {}", self.selected);
        }
        Ok(())
    }

    /// Mouse-wheel style cycling with wrap-around: positive delta moves
    /// to the previous slot, negative to the next.
    pub fn scroll(&mut self, registry: &ContainerRegistry, delta: f32) -> Result<()> {
        let capacity = registry.get(self.container)?.capacity();
        if delta > 0.0 {
            self.selected = if self.selected == 0 { capacity - 1 } else { self.selected - 1 };
        } else if delta < 0.0 {
            self.selected = (self.selected + 1) % capacity;
        }
        Ok(())
    }

    /// Read-only view of the stack under the cursor.
    pub fn selected_stack(&self, registry: &ContainerRegistry) -> Result<ItemStack> {
        Ok(*registry.get(self.container)?.get(self.selected)?)
    }

    /// Consumes one unit from the selected slot via the container's
    /// own primitive, emitting the contents-changed event. `None` when
    /// the slot is empty.
    pub fn consume_one(&self, registry: &mut ContainerRegistry) -> Result<Option<ItemStack>> {
        let taken = registry.get_mut(self.container)?.take_one(self.selected)?;
        if taken.is_some() {
            registry.emit_changed(self.container);
        }
        Ok(taken)
    }
}
