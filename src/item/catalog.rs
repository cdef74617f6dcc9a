use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::item::category::{CategoryId, CategoryRecord, CategoryTable};

/// Identifies an item type in the content catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKindId(pub u32);

/// A catalog record for one item type. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemKind {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: CategoryId,
    /// Maximum units one slot can hold of this kind. Always > 0.
    pub stack_size: u32,
    /// Opaque handle into the host's icon/sprite atlas.
    #[serde(default)]
    pub icon: u32,
}

/// Registry for all item kinds, read-only to the rest of the core.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    kinds: HashMap<ItemKindId, ItemKind>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new kind. Stack sizes below 1 are rejected since a
    /// zero-capacity kind could never satisfy the slot invariant.
    pub fn register(&mut self, id: ItemKindId, kind: ItemKind) -> Result<()> {
        if kind.stack_size == 0 {
            return Err(InventoryError::BadCatalogData(format!(
                "item kind {} ({}) has stack size 0",
                id.0, kind.name
            )));
        }
        self.kinds.insert(id, kind);
        Ok(())
    }

    pub fn get(&self, id: ItemKindId) -> Option<&ItemKind> {
        self.kinds.get(&id)
    }

    /// Stack capacity for a kind. Unknown kinds report 0 so callers
    /// never grow a stack they cannot reason about.
    pub fn stack_size(&self, id: ItemKindId) -> u32 {
        self.get(id).map(|k| k.stack_size).unwrap_or(0)
    }

    pub fn category(&self, id: ItemKindId) -> Option<CategoryId> {
        self.get(id).map(|k| k.category)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// On-disk content shape: categories in ordinal order plus item records.
#[derive(Debug, Deserialize)]
struct ContentFile {
    categories: Vec<CategoryRecord>,
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    id: u32,
    #[serde(flatten)]
    kind: ItemKind,
}

/// Loads a category table and item catalog from one JSON document.
pub fn load_content(json: &str) -> Result<(CategoryTable, ItemCatalog)> {
    let file: ContentFile =
        serde_json::from_str(json).map_err(|e| InventoryError::BadCatalogData(e.to_string()))?;

    let table = CategoryTable::from_records(file.categories);
    let mut catalog = ItemCatalog::new();
    for entry in file.items {
        if table.get(entry.kind.category).is_none() {
            return Err(InventoryError::BadCatalogData(format!(
                "item {} references unknown category {}",
                entry.id, entry.kind.category.0
            )));
        }
        catalog.register(ItemKindId(entry.id), entry.kind)?;
    }
    Ok((table, catalog))
}
