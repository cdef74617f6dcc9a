use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};

/// Ordered taxonomy id. Sort precedence between stacks is the ordinal
/// order of their categories, coarser than the item kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CategoryId(pub u16);

/// One category record: a display name plus a parent ordinal.
/// A root is a category whose parent is itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub parent: CategoryId,
}

/// The category hierarchy, indexed by ordinal.
///
/// Parents are stored as a flat array of ids and resolved by walking
/// upward. The walk is bounded by the table length so malformed data
/// (a parent cycle below the declared root) fails with
/// [`InventoryError::MalformedHierarchy`] instead of looping forever.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTable {
    records: Vec<CategoryRecord>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<CategoryRecord>) -> Self {
        Self { records }
    }

    /// Appends a category and returns its ordinal.
    pub fn register(&mut self, name: impl Into<String>, parent: CategoryId) -> CategoryId {
        let id = CategoryId(self.records.len() as u16);
        self.records.push(CategoryRecord { name: name.into(), parent });
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryRecord> {
        self.records.get(id.0 as usize)
    }

    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.get(id).map(|r| r.name.as_str())
    }

    pub fn is_root(&self, id: CategoryId) -> bool {
        self.get(id).map(|r| r.parent == id).unwrap_or(false)
    }

    /// Depth of `id` below its root: a root is level 0.
    pub fn level(&self, id: CategoryId) -> Result<u32> {
        let mut level = 0;
        self.walk(id, |_| level += 1)?;
        Ok(level)
    }

    /// Slash-joined path from `id` up to its root, e.g. `"Axe/Tool/Item"`.
    pub fn path(&self, id: CategoryId) -> Result<String> {
        let start_name = self
            .name(id)
            .ok_or(InventoryError::MalformedHierarchy { start: id.0, steps: 0 })?;
        let mut parts = vec![start_name.to_owned()];
        self.walk(id, |parent| parts.push(self.records[parent.0 as usize].name.clone()))?;
        Ok(parts.join("/"))
    }

    /// Walks parents from `id` to the root, invoking `visit` for each
    /// parent stepped onto. Bounded by the table length.
    fn walk(&self, id: CategoryId, mut visit: impl FnMut(CategoryId)) -> Result<()> {
        let mut current = id;
        for steps in 0..=self.records.len() {
            let record = self
                .get(current)
                .ok_or(InventoryError::MalformedHierarchy { start: id.0, steps })?;
            if record.parent == current {
                return Ok(());
            }
            current = record.parent;
            visit(current);
        }
        log::warn!("category {} has no root within {} steps", id.0, self.records.len());
        Err(InventoryError::MalformedHierarchy { start: id.0, steps: self.records.len() })
    }
}
