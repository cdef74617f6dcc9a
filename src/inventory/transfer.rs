//! Pointer-driven transfer protocol between containers.
//!
//! One coordinator per player session. Events arrive synchronously in
//! order within a tick; every mutating sequence uses take/place pairs
//! so a failure midway can never duplicate or drop items.

use std::collections::HashMap;

use crate::error::Result;
use crate::inventory::container::{ContainerId, ContainerRegistry};
use crate::inventory::organizer;
use crate::item::ItemCatalog;

/// A `(container, index)` pair naming one slot, produced by the host's
/// event bridge from widget identity via `SlotGeometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    pub container: ContainerId,
    pub index: usize,
}

/// Keyboard modifiers attached to a pointer-down event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { source: SlotRef, hover: Option<SlotRef> },
}

/// Drag-and-drop state machine across one or more containers.
///
/// Picking up is purely logical: the source slot is not cleared until
/// drop, so a drag cancelled by releasing outside the grid leaves every
/// container untouched. A renderer wanting a held-item visual reads
/// [`drag_source`](Self::drag_source) each tick instead of taking
/// ownership of any widget.
#[derive(Debug, Default)]
pub struct TransferCoordinator {
    state: DragState,
    /// Shift-click destination per container, injected by the session
    /// (quick-bar moves to a bag, bags move to the quick-bar).
    alternates: HashMap<ContainerId, ContainerId>,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl TransferCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares where shift-clicked stacks from `from` should go.
    pub fn set_alternate(&mut self, from: ContainerId, to: ContainerId) {
        self.alternates.insert(from, to);
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The picked-up slot while a drag is in progress.
    pub fn drag_source(&self) -> Option<SlotRef> {
        match self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// The slot currently under the pointer while dragging.
    pub fn hover_target(&self) -> Option<SlotRef> {
        match self.state {
            DragState::Dragging { hover, .. } => hover,
            DragState::Idle => None,
        }
    }

    /// Pointer pressed on a slot.
    ///
    /// Unmodified press on an occupied slot starts a drag. Shift-press
    /// on an occupied slot is a synchronous move to the container's
    /// designated alternate; shift-press on an empty slot runs the
    /// organizer on that container instead.
    pub fn pointer_down(
        &mut self,
        registry: &mut ContainerRegistry,
        catalog: &ItemCatalog,
        slot: SlotRef,
        modifiers: Modifiers,
    ) -> Result<()> {
        if self.is_dragging() {
            log::debug!("pointer down while dragging, ignored");
            return Ok(());
        }
        let occupied = !registry.get(slot.container)?.get(slot.index)?.is_empty();

        if modifiers.shift {
            if occupied {
                self.shift_move(registry, slot)
            } else {
                organizer::organize_container(registry, catalog, slot.container)
            }
        } else {
            if occupied {
                log::debug!("drag started from {:?} slot {}", slot.container, slot.index);
                self.state = DragState::Dragging { source: slot, hover: None };
            }
            Ok(())
        }
    }

    /// Pointer moved onto a slot. Tracking only, no mutation. Targets
    /// failing validation are treated as "no hover target".
    pub fn pointer_enter(&mut self, registry: &ContainerRegistry, slot: SlotRef) {
        let DragState::Dragging { hover, .. } = &mut self.state else {
            return;
        };
        let valid = registry
            .get(slot.container)
            .and_then(|c| c.get(slot.index))
            .is_ok();
        if valid {
            *hover = Some(slot);
        } else {
            log::debug!("hover on invalid slot {:?}/{}, cleared", slot.container, slot.index);
            *hover = None;
        }
    }

    /// Pointer left a slot; clears the hover target if it matches.
    pub fn pointer_exit(&mut self, slot: SlotRef) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            if *hover == Some(slot) {
                *hover = None;
            }
        }
    }

    /// Pointer released: swap with the hover target when one is set and
    /// distinct from the source, otherwise cancel. Returns to `Idle`
    /// unconditionally.
    pub fn pointer_up(&mut self, registry: &mut ContainerRegistry) -> Result<()> {
        let DragState::Dragging { source, hover } = std::mem::take(&mut self.state) else {
            log::debug!("pointer up while idle, ignored");
            return Ok(());
        };
        let Some(hover) = hover else {
            log::debug!("drag from {:?} slot {} cancelled", source.container, source.index);
            return Ok(());
        };
        if hover == source {
            return Ok(());
        }
        swap_slots(registry, source, hover)
    }

    /// Moves the whole stack at `slot` to the first empty slot of the
    /// container's alternate. On any failure the stack stays (or is put
    /// back) in its original slot; it is never partially removed.
    fn shift_move(&mut self, registry: &mut ContainerRegistry, slot: SlotRef) -> Result<()> {
        let Some(&target) = self.alternates.get(&slot.container) else {
            log::debug!("no alternate container for {:?}", slot.container);
            return Ok(());
        };
        let Some(dest) = registry.get(target)?.first_empty_slot() else {
            log::debug!("alternate {:?} is full, stack stays put", target);
            return Ok(());
        };

        let stack = registry.get_mut(slot.container)?.take_all(slot.index)?;
        match registry.get_mut(target)?.try_place(dest, stack) {
            Ok(()) => {
                registry.emit_changed(slot.container);
                registry.emit_changed(target);
                Ok(())
            }
            Err(err) => {
                // first_empty_slot said empty, so a refusal is
                // unreachable in a single-threaded tick; restore the
                // source before reporting anything.
                registry.get_mut(slot.container)?.force_place(slot.index, stack)?;
                log::warn!("shift move target refused ({err}), stack restored");
                Ok(())
            }
        }
    }
}

/// Atomic swap of two slots, possibly across containers.
///
/// Both `take_all` calls complete before either `force_place`, so no
/// intermediate state with duplicated or lost items is observable even
/// when both refs share a container. Bounds are validated up front so
/// the mutating sequence itself cannot fail.
fn swap_slots(registry: &mut ContainerRegistry, a: SlotRef, b: SlotRef) -> Result<()> {
    registry.get(a.container)?.get(a.index)?;
    registry.get(b.container)?.get(b.index)?;

    let a_stack = registry.get_mut(a.container)?.take_all(a.index)?;
    let b_stack = registry.get_mut(b.container)?.take_all(b.index)?;
    registry.get_mut(a.container)?.force_place(a.index, b_stack)?;
    registry.get_mut(b.container)?.force_place(b.index, a_stack)?;

    registry.emit_changed(a.container);
    if b.container != a.container {
        registry.emit_changed(b.container);
    }
    log::debug!(
        "swapped {:?} slot {} with {:?} slot {}",
        a.container, a.index, b.container, b.index
    );
    Ok(())
}
