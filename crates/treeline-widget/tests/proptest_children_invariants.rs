//! Property-based invariant tests for the ordered children editor.
//!
//! These verify structural invariants for any valid inputs:
//!
//! 1. `move_range` preserves length and element multiset.
//! 2. The moved run stays contiguous and keeps its relative order.
//! 3. The unmoved remainder keeps its relative order.
//! 4. `remove_range` deletes exactly the addressed run.
//! 5. `take_range` returns exactly the run `remove_range` would delete.

use proptest::prelude::*;
use treeline_widget::{Children, MutableChildren};

fn children_of(items: &[u32]) -> MutableChildren<u32> {
    let mut children = MutableChildren::new();
    for (i, &item) in items.iter().enumerate() {
        children.insert(i, item);
    }
    children
}

/// A list plus a valid (from, to, count) triple: the run fits inside the
/// list and `to` addresses a pre-move position outside the run itself.
fn move_args() -> impl Strategy<Value = (Vec<u32>, usize, usize, usize)> {
    (1usize..16)
        .prop_flat_map(|len| {
            let items = (0..len as u32).map(|i| i * 10).collect::<Vec<_>>();
            (Just(items), 1..=len)
        })
        .prop_flat_map(|(items, count)| {
            let len = items.len();
            (Just(items), Just(count), 0..=len - count)
        })
        .prop_flat_map(|(items, count, from)| {
            let len = items.len();
            let to = if from == 0 {
                (count..=len).boxed()
            } else {
                prop_oneof![0..from, (from + count)..=len].boxed()
            };
            (Just(items), Just(from), to, Just(count))
        })
}

proptest! {
    #[test]
    fn move_preserves_length_and_multiset((items, from, to, count) in move_args()) {
        let mut children = children_of(&items);
        children.move_range(from, to, count);

        prop_assert_eq!(children.len(), items.len());
        let mut before = items.clone();
        let mut after = children.as_slice().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}

proptest! {
    #[test]
    fn moved_run_stays_contiguous_in_order((items, from, to, count) in move_args()) {
        let mut children = children_of(&items);
        children.move_range(from, to, count);

        let run = &items[from..from + count];
        let dest = if from > to { to } else { to - count };
        prop_assert_eq!(&children.as_slice()[dest..dest + count], run);
    }
}

proptest! {
    #[test]
    fn remainder_keeps_relative_order((items, from, to, count) in move_args()) {
        let mut children = children_of(&items);
        children.move_range(from, to, count);

        let run: Vec<u32> = items[from..from + count].to_vec();
        let expected: Vec<u32> = items
            .iter()
            .copied()
            .filter(|item| !run.contains(item))
            .collect();
        let actual: Vec<u32> = children
            .iter()
            .copied()
            .filter(|item| !run.contains(item))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

proptest! {
    #[test]
    fn remove_and_take_agree(
        items in proptest::collection::vec(any::<u32>(), 1..16),
        seed in any::<prop::sample::Index>(),
    ) {
        let len = items.len();
        let index = seed.index(len);
        let count = 1 + seed.index(len - index);

        let mut removed = children_of(&items);
        removed.remove_range(index, count);

        let mut taken = children_of(&items);
        let taken_out = taken.take_range(index, count);

        prop_assert_eq!(removed.as_slice(), taken.as_slice());
        prop_assert_eq!(taken_out.as_slice(), &items[index..index + count]);

        let mut expected = items.clone();
        expected.drain(index..index + count);
        prop_assert_eq!(removed.as_slice(), expected.as_slice());
    }
}
