//! Boundary between the core and whatever UI layer the host brings.
//!
//! The core never renders; it obtains opaque widget handles from a
//! factory, positions them through `SlotGeometry`, and repaints them
//! from container state when told contents changed.

use glam::Vec2;

use crate::error::{InventoryError, Result};
use crate::inventory::container::{ContainerId, ContainerRegistry};
use crate::inventory::geometry::SlotGeometry;
use crate::inventory::stack::ItemStack;

/// Capability every slot widget must offer the core.
pub trait SlotWidget {
    /// Positions the widget at an offset from the background center.
    fn place(&mut self, offset: Vec2);
    /// Shows the given stack (icon + count).
    fn set_icon(&mut self, stack: &ItemStack);
    /// Shows the empty-slot state.
    fn clear(&mut self);
}

/// Widget construction, implemented by the host UI layer.
pub trait UiFactory {
    type Widget: SlotWidget;

    fn create_background(&mut self, size: Vec2);
    fn create_header(&mut self, offset: Vec2, size: Vec2);
    fn create_slot(&mut self) -> Self::Widget;
}

/// Binds one container to a grid of slot widgets.
#[derive(Debug)]
pub struct InventoryView<W: SlotWidget> {
    container: ContainerId,
    geometry: SlotGeometry,
    widgets: Vec<W>,
    open: bool,
}

impl<W: SlotWidget> InventoryView<W> {
    /// Builds the background, optional header, and one widget per slot,
    /// placed per the geometry.
    pub fn build<F>(
        factory: &mut F,
        container: ContainerId,
        geometry: SlotGeometry,
    ) -> Result<Self>
    where
        F: UiFactory<Widget = W>,
    {
        factory.create_background(geometry.background_size());
        if let Some((offset, size)) = geometry.header_rect() {
            factory.create_header(offset, size);
        }

        let mut widgets = Vec::with_capacity(geometry.capacity());
        for index in 0..geometry.capacity() {
            let mut widget = factory.create_slot();
            widget.place(geometry.index_to_position(index)?);
            widget.clear();
            widgets.push(widget);
        }

        Ok(Self { container, geometry, widgets, open: false })
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Translates a pointer position into a slot index for the event
    /// bridge. `OutOfBounds` means the pointer is off the grid.
    pub fn slot_at(&self, position: Vec2) -> Result<usize> {
        self.geometry.position_to_index(position)
    }

    /// Repaints every widget from current container state.
    ///
    /// Fails with `InconsistentWidgetCount` when the widget list no
    /// longer matches the container capacity (e.g. the container was
    /// resized under a live view). The mismatch is surfaced for the
    /// operator to regenerate the view; repairing it silently could
    /// hide live data.
    pub fn refresh(&mut self, registry: &ContainerRegistry) -> Result<()> {
        let container = registry.get(self.container)?;
        if self.widgets.len() != container.capacity() {
            log::warn!(
                "view for {:?} has {} widgets but container holds {} slots, regenerate required",
                self.container,
                self.widgets.len(),
                container.capacity()
            );
            return Err(InventoryError::InconsistentWidgetCount {
                widgets: self.widgets.len(),
                capacity: container.capacity(),
            });
        }

        for (index, widget) in self.widgets.iter_mut().enumerate() {
            let stack = container.get(index)?;
            if stack.is_empty() {
                widget.clear();
            } else {
                widget.set_icon(stack);
            }
        }
        Ok(())
    }
}
