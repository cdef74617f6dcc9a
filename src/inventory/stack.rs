use serde::{Deserialize, Serialize};

use crate::item::{ItemCatalog, ItemKindId};

/// A stack of items occupying one slot: an item kind plus a count.
///
/// The empty stack (`kind == None`, `amount == 0`) is the canonical
/// "no item" value; `kind` is present exactly when `amount > 0`, and
/// `amount` never exceeds the kind's catalog stack size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: Option<ItemKindId>,
    pub amount: u32,
}

impl ItemStack {
    pub const EMPTY: ItemStack = ItemStack { kind: None, amount: 0 };

    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Creates a stack, normalizing a zero amount to the empty value.
    pub fn new(kind: ItemKindId, amount: u32) -> Self {
        if amount == 0 {
            Self::EMPTY
        } else {
            Self { kind: Some(kind), amount }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }

    pub fn with_amount(self, amount: u32) -> Self {
        match self.kind {
            Some(kind) => Self::new(kind, amount),
            None => Self::EMPTY,
        }
    }

    /// Remaining capacity before this stack hits its kind's stack size.
    /// Empty stacks and kinds missing from the catalog report 0.
    pub fn space_left(&self, catalog: &ItemCatalog) -> u32 {
        match self.kind {
            Some(kind) => catalog.stack_size(kind).saturating_sub(self.amount),
            None => 0,
        }
    }

    pub fn is_full(&self, catalog: &ItemCatalog) -> bool {
        !self.is_empty() && self.space_left(catalog) == 0
    }

    /// Clamps the amount to the kind's stack size and normalizes a
    /// drained stack back to the empty value.
    pub fn clamp(&mut self, catalog: &ItemCatalog) {
        if let Some(kind) = self.kind {
            self.amount = self.amount.min(catalog.stack_size(kind));
        }
        if self.amount == 0 {
            *self = Self::EMPTY;
        }
    }

    /// Moves as many units as fit from `other` into this stack and
    /// returns the number moved. Pure count arithmetic: the caller
    /// decides whether the two stacks are compatible. `other` becomes
    /// empty if fully drained.
    pub fn absorb(&mut self, other: &mut ItemStack, catalog: &ItemCatalog) -> u32 {
        if self.is_empty() || other.is_empty() {
            return 0;
        }
        let moved = self.space_left(catalog).min(other.amount);
        self.amount += moved;
        other.amount -= moved;
        if other.amount == 0 {
            *other = Self::EMPTY;
        }
        moved
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::EMPTY
    }
}
