//! Ordered children-slot primitives.

/// An ordered collection of child widgets belonging to one slot of a parent.
///
/// These three operations are the only structural primitives in the system;
/// every higher-level reconciliation is expressed in terms of them. Arguments
/// can be assumed valid against the current list state — callers perform no
/// additional bounds checking, and neither should implementations beyond
/// what their backing store enforces.
pub trait Children<V> {
    /// Splice `child` in at `index`, relative to the pre-insert list.
    fn insert(&mut self, index: usize, child: V);

    /// Move `count` children from `from_index` to begin at `to_index`.
    ///
    /// Both indices are relative to the list state before the move. The run
    /// `[from_index, from_index + count)` is lifted out, the gap closes, and
    /// the run is re-inserted keeping its relative order. To move the child
    /// at position 1 to after the child at position 2, pass `from_index = 1`
    /// and `to_index = 3`: on `[A,B,C,D,E]` that yields `[A,C,B,D,E]`.
    ///
    /// `to_index` must lie outside the moved run itself: strictly before
    /// `from_index`, or at least `from_index + count`.
    fn move_range(&mut self, from_index: usize, to_index: usize, count: usize);

    /// Delete the run `[index, index + count)`.
    fn remove_range(&mut self, index: usize, count: usize);
}

/// A `Vec`-backed [`Children`] implementation.
///
/// Platform bindings that need side effects on mutation (attaching native
/// views, invalidating a surface) usually wrap one of these and forward.
#[derive(Debug, Clone, Default)]
pub struct MutableChildren<V> {
    items: Vec<V>,
}

impl<V> MutableChildren<V> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.items
    }

    /// Delete the run `[index, index + count)` and return the removed
    /// children, oldest position first.
    ///
    /// This is the audit-path variant of
    /// [`remove_range`](Children::remove_range): a producer-side caller uses
    /// the returned identities to populate a remove change's id list.
    pub fn take_range(&mut self, index: usize, count: usize) -> Vec<V> {
        self.items.drain(index..index + count).collect()
    }
}

impl<V> Children<V> for MutableChildren<V> {
    fn insert(&mut self, index: usize, child: V) {
        self.items.insert(index, child);
    }

    fn move_range(&mut self, from_index: usize, to_index: usize, count: usize) {
        debug_assert!(
            to_index < from_index || to_index >= from_index + count,
            "move destination {to_index} is inside the moved run {from_index}..{}",
            from_index + count
        );
        // `to_index` is pre-move; once the run is lifted out, positions after
        // it shift down by `count`.
        let dest = if from_index > to_index {
            to_index
        } else {
            to_index - count
        };
        let run: Vec<V> = self.items.drain(from_index..from_index + count).collect();
        self.items.splice(dest..dest, run);
    }

    fn remove_range(&mut self, index: usize, count: usize) {
        self.items.drain(index..index + count);
    }
}

impl<'a, V> IntoIterator for &'a MutableChildren<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcde() -> MutableChildren<char> {
        let mut children = MutableChildren::new();
        for (i, c) in "ABCDE".chars().enumerate() {
            children.insert(i, c);
        }
        children
    }

    #[test]
    fn insert_splices_at_index() {
        let mut children = abcde();
        children.insert(2, 'X');
        assert_eq!(children.as_slice(), &['A', 'B', 'X', 'C', 'D', 'E']);
    }

    #[test]
    fn move_forward_single() {
        let mut children = abcde();
        children.move_range(1, 3, 1);
        assert_eq!(children.as_slice(), &['A', 'C', 'B', 'D', 'E']);
    }

    #[test]
    fn move_backward_single() {
        let mut children = abcde();
        children.move_range(3, 1, 1);
        assert_eq!(children.as_slice(), &['A', 'D', 'B', 'C', 'E']);
    }

    #[test]
    fn move_forward_run_keeps_relative_order() {
        let mut children = abcde();
        children.move_range(0, 4, 2);
        assert_eq!(children.as_slice(), &['C', 'D', 'A', 'B', 'E']);
    }

    #[test]
    fn move_backward_run_keeps_relative_order() {
        let mut children = abcde();
        children.move_range(3, 0, 2);
        assert_eq!(children.as_slice(), &['D', 'E', 'A', 'B', 'C']);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "inside the moved run")]
    fn move_into_own_run_is_a_contract_violation() {
        let mut children = abcde();
        children.move_range(0, 0, 1);
    }

    #[test]
    fn remove_range_deletes_run() {
        let mut children = abcde();
        children.remove_range(1, 3);
        assert_eq!(children.as_slice(), &['A', 'E']);
    }

    #[test]
    fn take_range_returns_removed_identities() {
        let mut children = abcde();
        let taken = children.take_range(1, 2);
        assert_eq!(taken, vec!['B', 'C']);
        assert_eq!(children.as_slice(), &['A', 'D', 'E']);
    }
}
