pub mod view;

pub use view::{InventoryView, SlotWidget, UiFactory};
