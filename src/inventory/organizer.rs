//! Stateless merge/sort pass over a single container.
//!
//! Two deterministic phases, never interrupted mid-phase: a fill-left
//! merge of compatible stacks, then a stable sort by category and
//! amount with empties last.

use std::cmp::Reverse;

use crate::error::Result;
use crate::inventory::container::{Container, ContainerId, ContainerRegistry};
use crate::inventory::stack::ItemStack;
use crate::item::ItemCatalog;

/// Merge phase: for each non-empty, non-full slot `i` in index order,
/// pull units out of later slots sharing `i`'s *category*, earliest
/// first, until `i` is full. Slots drained to zero become empty.
///
/// Stacks are matched by category rather than exact kind: units pulled
/// from a different kind in the same category adopt the absorbing
/// stack's kind. Intentional carry-over from the original system,
/// where category was the stacking key.
pub fn merge_stacks(container: &mut Container, catalog: &ItemCatalog) {
    let slots = container.slots_mut();
    for i in 0..slots.len() {
        if slots[i].is_empty() {
            continue;
        }
        let Some(category) = slots[i].kind.and_then(|k| catalog.category(k)) else {
            continue;
        };
        for j in (i + 1)..slots.len() {
            if slots[i].is_full(catalog) {
                break;
            }
            let compatible = slots[j]
                .kind
                .and_then(|k| catalog.category(k))
                .map(|c| c == category)
                .unwrap_or(false);
            if !compatible {
                continue;
            }
            let (left, right) = slots.split_at_mut(j);
            left[i].absorb(&mut right[0], catalog);
        }
    }
}

/// Sort phase: stable sort with empty stacks last; among non-empty
/// stacks, ascending category ordinal, then descending amount. Equal
/// ranks keep their relative order so repeated sorts do not jitter.
pub fn sort_stacks(container: &mut Container, catalog: &ItemCatalog) {
    container.slots_mut().sort_by_key(|stack| rank(stack, catalog));
}

fn rank(stack: &ItemStack, catalog: &ItemCatalog) -> (u8, u16, Reverse<u32>) {
    match stack.kind {
        // Kinds missing from the catalog sort after every known
        // category but before empties.
        Some(kind) => {
            let category = catalog.category(kind).map(|c| c.0).unwrap_or(u16::MAX);
            (0, category, Reverse(stack.amount))
        }
        None => (1, 0, Reverse(0)),
    }
}

/// Both phases back to back. Total units per kind are conserved by the
/// sort and, within each category, by the merge.
pub fn organize(container: &mut Container, catalog: &ItemCatalog) {
    merge_stacks(container, catalog);
    sort_stacks(container, catalog);
}

/// [`organize`] routed through the registry, emitting one
/// contents-changed event for the touched container.
pub fn organize_container(
    registry: &mut ContainerRegistry,
    catalog: &ItemCatalog,
    id: ContainerId,
) -> Result<()> {
    let container = registry.get_mut(id)?;
    organize(container, catalog);
    registry.emit_changed(id);
    log::debug!("organized container {:?}", id);
    Ok(())
}
