use glam::Vec2;

use crate::error::{InventoryError, Result};
use crate::inventory::container::Container;

/// Default slot edge length in pixels.
pub const SLOT_SIZE: f32 = 48.0;
/// Default gap between slots in pixels.
pub const SLOT_PADDING: f32 = 4.0;

/// Pure mapping between a container's 2D layout, its linear slot
/// index, and pixel-space offsets from the background center.
///
/// Holds only layout parameters, no slot contents; every function is
/// deterministic in rows/cols/slot size/padding/header height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    rows: usize,
    cols: usize,
    slot_size: f32,
    padding: f32,
    header_height: Option<f32>,
}

impl SlotGeometry {
    pub fn new(rows: usize, cols: usize, slot_size: f32, padding: f32) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self { rows, cols, slot_size, padding, header_height: None }
    }

    /// Default-sized geometry matching a container's dimensions.
    pub fn for_container(container: &Container) -> Self {
        Self::new(container.rows(), container.cols(), SLOT_SIZE, SLOT_PADDING)
    }

    /// Reserves a header band above the grid; slot positions shift
    /// down by half its height so the grid stays centered below it.
    pub fn with_header(mut self, height: f32) -> Self {
        self.header_height = Some(height);
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Center-to-center distance between adjacent slots.
    fn step(&self) -> f32 {
        self.slot_size + self.padding
    }

    /// Extent of the slot grid itself, excluding the outer border.
    fn inner_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * self.step()
    }

    /// Size of the background widget: the grid plus one padding border,
    /// plus the header band when present.
    pub fn background_size(&self) -> Vec2 {
        let mut size = self.inner_size() + Vec2::splat(self.padding);
        if let Some(h) = self.header_height {
            size.y += h;
        }
        size
    }

    /// Header placement as `(center offset, size)`, anchored to the top
    /// edge of the background. `None` without a header.
    pub fn header_rect(&self) -> Option<(Vec2, Vec2)> {
        let height = self.header_height?;
        let background = self.background_size();
        let offset = Vec2::new(0.0, background.y * 0.5 - height * 0.5);
        Some((offset, Vec2::new(background.x, height)))
    }

    /// Slot-center offset from the background center for a row-major
    /// linear index.
    pub fn index_to_position(&self, index: usize) -> Result<Vec2> {
        if index >= self.capacity() {
            return Err(InventoryError::IndexOutOfRange { index, capacity: self.capacity() });
        }
        let col = (index % self.cols) as f32;
        let row = (index / self.cols) as f32;

        let inner = self.inner_size();
        let mut pos = Vec2::new(col, row) * self.step();
        pos -= inner * 0.5;
        pos += Vec2::splat(self.step() * 0.5);
        if let Some(h) = self.header_height {
            pos.y -= h * 0.5;
        }
        Ok(pos)
    }

    /// Inverse of [`index_to_position`](Self::index_to_position),
    /// rounding to the nearest slot center so pointer positions
    /// slightly off-center still resolve to the intended slot.
    /// Positions outside the grid are `OutOfBounds`, which callers
    /// treat as "no hover target".
    pub fn position_to_index(&self, pos: Vec2) -> Result<usize> {
        let inner = self.inner_size();
        let mut p = pos;
        if let Some(h) = self.header_height {
            p.y += h * 0.5;
        }
        p += inner * 0.5;
        p -= Vec2::splat(self.step() * 0.5);

        let col = (p.x / self.step()).round();
        let row = (p.y / self.step()).round();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return Err(InventoryError::OutOfBounds { x: pos.x, y: pos.y });
        }
        Ok(row as usize * self.cols + col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_indices() {
        let plain = SlotGeometry::new(4, 9, SLOT_SIZE, SLOT_PADDING);
        let with_header = SlotGeometry::new(3, 5, 32.0, 6.0).with_header(20.0);

        for geometry in [plain, with_header] {
            for i in 0..geometry.capacity() {
                let pos = geometry.index_to_position(i).expect("valid index");
                let back = geometry.position_to_index(pos).expect("slot center in grid");
                assert_eq!(back, i, "round trip failed for index {i}");
            }
        }
    }

    #[test]
    fn test_near_center_rounds_to_slot() {
        let geometry = SlotGeometry::new(2, 2, SLOT_SIZE, SLOT_PADDING);
        let center = geometry.index_to_position(3).expect("valid index");
        // Anywhere within half a step of the center resolves to the slot.
        let nudge = Vec2::splat((SLOT_SIZE + SLOT_PADDING) * 0.4);
        assert_eq!(geometry.position_to_index(center + nudge).expect("nudged"), 3);
        assert_eq!(geometry.position_to_index(center - nudge).expect("nudged"), 3);
    }

    #[test]
    fn test_outside_grid_is_out_of_bounds() {
        let geometry = SlotGeometry::new(2, 3, SLOT_SIZE, SLOT_PADDING);
        let background = geometry.background_size();
        let outside = Vec2::new(background.x, background.y);
        assert!(matches!(
            geometry.position_to_index(outside),
            Err(InventoryError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_invalid_index() {
        let geometry = SlotGeometry::new(2, 2, SLOT_SIZE, SLOT_PADDING);
        assert!(matches!(
            geometry.index_to_position(4),
            Err(InventoryError::IndexOutOfRange { index: 4, capacity: 4 })
        ));
    }

    #[test]
    fn test_background_grows_with_header() {
        let base = SlotGeometry::new(2, 2, SLOT_SIZE, SLOT_PADDING);
        let with_header = base.with_header(16.0);
        assert_eq!(
            with_header.background_size().y,
            base.background_size().y + 16.0
        );

        let (offset, size) = with_header.header_rect().expect("header present");
        assert_eq!(size.y, 16.0);
        assert!(offset.y > 0.0);
        assert!(base.header_rect().is_none());
    }
}
