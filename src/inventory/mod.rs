pub mod container;
pub mod geometry;
pub mod organizer;
pub mod quick_select;
pub mod stack;
pub mod transfer;

pub use container::{Container, ContainerEvent, ContainerId, ContainerRegistry};
pub use geometry::{SlotGeometry, SLOT_PADDING, SLOT_SIZE};
pub use organizer::{merge_stacks, organize, organize_container, sort_stacks};
pub use quick_select::QuickSelect;
pub use stack::ItemStack;
pub use transfer::{Modifiers, SlotRef, TransferCoordinator};
