//! Cross-module properties: geometry round-trips, invariant
//! preservation, conservation across organize and swap, and first-fit
//! determinism over randomized occupancy.

use rand::prelude::*;

use satchel::inventory::{organize, SLOT_PADDING, SLOT_SIZE};
use satchel::{
    CategoryId, Container, ContainerRegistry, InventoryError, ItemCatalog, ItemKind, ItemKindId,
    ItemStack, Modifiers, SlotGeometry, SlotRef, TransferCoordinator,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const KINDS: [(ItemKindId, &str, u16, u32); 4] = [
    (ItemKindId(1), "Wood", 1, 10),
    (ItemKindId(2), "Stone", 1, 10),
    (ItemKindId(3), "Potion", 2, 5),
    (ItemKindId(4), "Sword", 0, 1),
];

fn catalog() -> ItemCatalog {
    let mut catalog = ItemCatalog::new();
    for (id, name, category, stack_size) in KINDS {
        catalog
            .register(
                id,
                ItemKind {
                    name: name.to_owned(),
                    description: String::new(),
                    category: CategoryId(category),
                    stack_size,
                    icon: 0,
                },
            )
            .expect("register kind");
    }
    catalog
}

fn assert_invariants(container: &Container, catalog: &ItemCatalog) {
    for stack in container.iter() {
        assert_eq!(
            stack.kind.is_none(),
            stack.amount == 0,
            "kind and amount must be empty together: {stack:?}"
        );
        if let Some(kind) = stack.kind {
            assert!(
                stack.amount <= catalog.stack_size(kind),
                "stack over capacity: {stack:?}"
            );
        }
    }
}

#[test]
fn geometry_round_trip_across_shapes() {
    init_logging();
    let shapes = [
        SlotGeometry::new(1, 1, SLOT_SIZE, SLOT_PADDING),
        SlotGeometry::new(4, 9, SLOT_SIZE, SLOT_PADDING),
        SlotGeometry::new(7, 3, 20.0, 2.0),
        SlotGeometry::new(2, 8, 32.0, 6.0).with_header(18.0),
    ];
    for geometry in shapes {
        for i in 0..geometry.capacity() {
            let pos = geometry.index_to_position(i).expect("valid index");
            assert_eq!(
                geometry.position_to_index(pos).expect("center resolves"),
                i,
                "round trip failed at index {i} for {geometry:?}"
            );
        }
    }
}

#[test]
fn first_fit_is_lowest_empty_index_over_random_occupancy() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let mut container = Container::new(rng.gen_range(1..=5), rng.gen_range(1..=6));
        for i in 0..container.capacity() {
            if rng.gen_bool(0.5) {
                container
                    .force_place(i, ItemStack::new(ItemKindId(1), rng.gen_range(1..=10)))
                    .expect("seed slot");
            }
        }

        let expected = (0..container.capacity())
            .find(|&i| container.get(i).expect("in bounds").is_empty());
        assert_eq!(container.first_empty_slot(), expected);
    }
}

#[test]
fn organize_preserves_invariants_and_per_kind_totals() {
    init_logging();
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let mut container = Container::new(rng.gen_range(1..=4), rng.gen_range(1..=6));
        for i in 0..container.capacity() {
            if rng.gen_bool(0.6) {
                // One kind per category keeps per-kind totals a valid
                // conservation check under category-keyed merging.
                let (id, _, _, stack_size) = [KINDS[0], KINDS[2], KINDS[3]][rng.gen_range(0..3)];
                container
                    .force_place(i, ItemStack::new(id, rng.gen_range(1..=stack_size)))
                    .expect("seed slot");
            }
        }

        let before: Vec<u32> = KINDS.iter().map(|k| container.count_of(k.0)).collect();
        organize(&mut container, &catalog);
        let after: Vec<u32> = KINDS.iter().map(|k| container.count_of(k.0)).collect();

        assert_eq!(before, after, "organize changed per-kind totals");
        assert_invariants(&container, &catalog);
    }
}

#[test]
fn organize_sorts_categories_ascending_with_empties_last() {
    init_logging();
    let catalog = catalog();
    let mut container = Container::new(2, 3);
    container.force_place(1, ItemStack::new(ItemKindId(3), 2)).expect("seed");
    container.force_place(3, ItemStack::new(ItemKindId(4), 1)).expect("seed");
    container.force_place(5, ItemStack::new(ItemKindId(1), 9)).expect("seed");

    organize(&mut container, &catalog);

    let ranks: Vec<Option<u16>> = container
        .iter()
        .map(|s| s.kind.and_then(|k| catalog.category(k)).map(|c| c.0))
        .collect();
    assert_eq!(ranks, vec![Some(0), Some(1), Some(2), None, None, None]);
}

#[test]
fn drag_swap_conserves_across_two_containers() {
    init_logging();
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(7);

    let mut reg = ContainerRegistry::new();
    let bag = reg.insert(Container::new(3, 3));
    let quick_bar = reg.insert(Container::new(1, 5));
    for (id, capacity) in [(bag, 9), (quick_bar, 5)] {
        for i in 0..capacity {
            if rng.gen_bool(0.5) {
                let (kind, _, _, stack_size) = KINDS[rng.gen_range(0..KINDS.len())];
                reg.get_mut(id)
                    .expect("container")
                    .force_place(i, ItemStack::new(kind, rng.gen_range(1..=stack_size)))
                    .expect("seed slot");
            }
        }
    }

    let totals = |reg: &ContainerRegistry| -> Vec<u32> {
        KINDS
            .iter()
            .map(|k| {
                reg.get(bag).expect("bag").count_of(k.0)
                    + reg.get(quick_bar).expect("quick bar").count_of(k.0)
            })
            .collect()
    };
    let before = totals(&reg);

    let mut tc = TransferCoordinator::new();
    for _ in 0..50 {
        let from = SlotRef {
            container: if rng.gen_bool(0.5) { bag } else { quick_bar },
            index: rng.gen_range(0..5),
        };
        let to = SlotRef {
            container: if rng.gen_bool(0.5) { bag } else { quick_bar },
            index: rng.gen_range(0..5),
        };
        tc.pointer_down(&mut reg, &catalog, from, Modifiers::default())
            .expect("pointer down");
        tc.pointer_enter(&reg, to);
        tc.pointer_up(&mut reg).expect("pointer up");
    }

    assert_eq!(totals(&reg), before, "drag swaps changed combined totals");
    assert_invariants(reg.get(bag).expect("bag"), &catalog);
    assert_invariants(reg.get(quick_bar).expect("quick bar"), &catalog);
}

#[test]
fn atomic_swap_example() {
    init_logging();
    let catalog = catalog();
    let mut reg = ContainerRegistry::new();
    let bag = reg.insert(Container::new(1, 4));
    reg.get_mut(bag)
        .expect("bag")
        .force_place(0, ItemStack::new(ItemKindId(3), 3))
        .expect("seed");
    reg.get_mut(bag)
        .expect("bag")
        .force_place(2, ItemStack::new(ItemKindId(4), 1))
        .expect("seed");

    let mut tc = TransferCoordinator::new();
    tc.pointer_down(
        &mut reg,
        &catalog,
        SlotRef { container: bag, index: 0 },
        Modifiers::default(),
    )
    .expect("pick up");
    tc.pointer_enter(&reg, SlotRef { container: bag, index: 2 });
    tc.pointer_up(&mut reg).expect("drop");

    let bag_ref = reg.get(bag).expect("bag");
    assert_eq!(*bag_ref.get(0).expect("slot 0"), ItemStack::new(ItemKindId(4), 1));
    assert_eq!(*bag_ref.get(2).expect("slot 2"), ItemStack::new(ItemKindId(3), 3));
}

#[test]
fn invariants_hold_across_mixed_operation_sequences() {
    init_logging();
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(1234);

    let mut reg = ContainerRegistry::new();
    let bag = reg.insert(Container::new(2, 4));
    let quick_bar = reg.insert(Container::new(1, 3));
    let mut tc = TransferCoordinator::new();
    tc.set_alternate(bag, quick_bar);
    tc.set_alternate(quick_bar, bag);

    for _ in 0..300 {
        let container = if rng.gen_bool(0.5) { bag } else { quick_bar };
        let capacity = reg.get(container).expect("container").capacity();
        let index = rng.gen_range(0..capacity);

        match rng.gen_range(0..5) {
            0 => {
                let (kind, _, _, stack_size) = KINDS[rng.gen_range(0..KINDS.len())];
                let stack = ItemStack::new(kind, rng.gen_range(1..=stack_size));
                match reg.get_mut(container).expect("container").try_place(index, stack) {
                    Ok(()) | Err(InventoryError::SlotOccupied { .. }) => {}
                    Err(err) => panic!("unexpected placement failure: {err}"),
                }
            }
            1 => {
                reg.get_mut(container).expect("container").take_one(index).expect("in bounds");
            }
            2 => {
                tc.pointer_down(
                    &mut reg,
                    &catalog,
                    SlotRef { container, index },
                    Modifiers { shift: rng.gen_bool(0.3) },
                )
                .expect("pointer down");
            }
            3 => {
                tc.pointer_enter(&reg, SlotRef { container, index });
            }
            _ => {
                tc.pointer_up(&mut reg).expect("pointer up");
            }
        }

        assert_invariants(reg.get(bag).expect("bag"), &catalog);
        assert_invariants(reg.get(quick_bar).expect("quick bar"), &catalog);
    }
}

#[test]
fn container_snapshot_serializes_slots_in_order() {
    init_logging();
    let mut container = Container::new(1, 3);
    container.force_place(1, ItemStack::new(ItemKindId(2), 4)).expect("seed");

    let json = serde_json::to_string(&container).expect("serialize container");
    let restored: Container = serde_json::from_str(&json).expect("deserialize container");

    assert_eq!(restored.rows(), 1);
    assert_eq!(restored.cols(), 3);
    assert!(restored.get(0).expect("slot 0").is_empty());
    assert_eq!(*restored.get(1).expect("slot 1"), ItemStack::new(ItemKindId(2), 4));
}
