use crate::inventory::ContainerId;

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Errors produced by the container subsystem.
///
/// Bounds and geometry errors are expected conditions that callers
/// recover from locally; `InconsistentWidgetCount` is reported upward
/// because silently rebuilding a stale view could hide live data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InventoryError {
    #[error("slot index {index} out of range for container with {capacity} slots")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("position ({x:.1}, {y:.1}) maps outside the slot grid")]
    OutOfBounds { x: f32, y: f32 },

    #[error("slot {index} is already occupied")]
    SlotOccupied { index: usize },

    #[error("{widgets} slot widgets bound to a {capacity}-slot container, view must be regenerated")]
    InconsistentWidgetCount { widgets: usize, capacity: usize },

    #[error("category {start} does not reach a root within {steps} steps, parent data is malformed")]
    MalformedHierarchy { start: u16, steps: usize },

    #[error("unknown container {0:?}")]
    UnknownContainer(ContainerId),

    #[error("catalog data error: {0}")]
    BadCatalogData(String),
}
