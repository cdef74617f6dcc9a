//! Grid-based item-container subsystem for real-time games.
//!
//! Tracks stackable items in fixed-size grids, supports pointer-driven
//! drag-and-drop rearrangement, merges and sorts stacks, and
//! coordinates transfers between multiple containers (a quick-bar and
//! any number of bags). Rendering and input decoding stay outside: the
//! host feeds `(container, index)` slot events in and repaints widgets
//! when a contents-changed event comes out.
//!
//! Everything runs single-threaded within one logical frame tick;
//! mutating sequences use take/place pairs so no failure can duplicate
//! or lose items.

pub mod error;
pub mod inventory;
pub mod item;
pub mod ui;

pub use error::{InventoryError, Result};
pub use inventory::{
    Container, ContainerEvent, ContainerId, ContainerRegistry, ItemStack, Modifiers, QuickSelect,
    SlotGeometry, SlotRef, TransferCoordinator,
};
pub use item::{CategoryId, CategoryTable, ItemCatalog, ItemKind, ItemKindId};
