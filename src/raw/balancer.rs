use log::trace;

use super::handle::Handle;
use super::node::Side;
use super::raw_tree::RawTree;

/// How far a rebalancing walk keeps restructuring once it has made a fix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rebalance {
    /// A single fix restores the subtree's old height, so the walk stops
    /// restructuring and only refreshes heights up to the root. Valid after an
    /// insertion.
    UntilFixed,
    /// A fix may leave the subtree one level shorter, so every ancestor is
    /// checked. Required after a removal.
    ToRoot,
}

impl RawTree {
    /// Height of an optional subtree; an absent subtree has height 0.
    #[inline]
    pub(crate) fn subtree_height(&self, handle: Option<Handle>) -> u8 {
        handle.map_or(0, |h| self.node(h).height())
    }

    /// `height(left) - height(right)`, or 0 for an absent node.
    pub(crate) fn balance_index(&self, handle: Option<Handle>) -> i16 {
        let Some(handle) = handle else {
            return 0;
        };
        let node = self.node(handle);
        i16::from(self.subtree_height(node.left())) - i16::from(self.subtree_height(node.right()))
    }

    pub(crate) fn update_height(&mut self, handle: Handle) {
        let node = self.node(handle);
        let height = 1 + self.subtree_height(node.left()).max(self.subtree_height(node.right()));
        self.node_mut(handle).set_height(height);
    }

    /// Refreshes cached heights from `start` up to the root, inclusive.
    pub(crate) fn update_heights(&mut self, start: Option<Handle>) {
        let mut cursor = start;
        while let Some(handle) = cursor {
            self.update_height(handle);
            cursor = self.node(handle).parent();
        }
    }

    /// Walks from `start` to the root, restoring the AVL invariant on the way.
    pub(crate) fn rebalance(&mut self, start: Option<Handle>, mode: Rebalance) {
        let mut cursor = start;
        while let Some(handle) = cursor {
            let heavy = match self.balance_index(Some(handle)) {
                2 => Side::Left,
                -2 => Side::Right,
                _ => {
                    self.update_height(handle);
                    cursor = self.node(handle).parent();
                    continue;
                }
            };

            let local_root = self.fix(handle, heavy);
            match mode {
                Rebalance::UntilFixed => {
                    self.update_heights(Some(local_root));
                    return;
                }
                Rebalance::ToRoot => cursor = self.node(local_root).parent(),
            }
        }
    }

    /// Rotates the subtree under `handle`, which leans two levels to `heavy`.
    /// Returns the subtree's new root.
    fn fix(&mut self, handle: Handle, heavy: Side) -> Handle {
        let child = self.node(handle).child(heavy).expect("heavy side of an unbalanced node is never empty");
        let child_index = self.balance_index(Some(child));
        trace!("rebalancing key {} (heavy {heavy:?}, child balance {child_index})", self.node(handle).key());

        match heavy {
            Side::Left => {
                if child_index < 0 {
                    let inner = self.node(child).right().expect("right-leaning child has a right child");
                    self.rotate_left(inner);
                }
                let pivot = self.node(handle).left().expect("left-heavy node keeps a left child");
                self.rotate_right(pivot);
                pivot
            }
            Side::Right => {
                if child_index > 0 {
                    let inner = self.node(child).left().expect("left-leaning child has a left child");
                    self.rotate_right(inner);
                }
                let pivot = self.node(handle).right().expect("right-heavy node keeps a right child");
                self.rotate_left(pivot);
                pivot
            }
        }
    }

    /// Lifts `pivot`, a right child, above its parent.
    ///
    /// ```text
    ///     P              C
    ///    / \            / \
    ///  T0   C    =>    P   T2
    ///      / \        / \
    ///    T1   T2    T0   T1
    /// ```
    pub(crate) fn rotate_left(&mut self, pivot: Handle) {
        self.lift(pivot, Side::Right);
    }

    /// Lifts `pivot`, a left child, above its parent. Mirror of [`Self::rotate_left`].
    pub(crate) fn rotate_right(&mut self, pivot: Handle) {
        self.lift(pivot, Side::Left);
    }

    fn lift(&mut self, pivot: Handle, from: Side) {
        let Some(parent) = self.node(pivot).parent() else {
            return;
        };
        debug_assert_eq!(self.node(parent).side_of(pivot), from);
        let grandparent = self.node(parent).parent();
        trace!("rotating key {} above key {}", self.node(pivot).key(), self.node(parent).key());

        // The pivot's inner subtree changes sides and hangs off the old parent.
        let inner = self.node(pivot).child(from.opposite());
        self.node_mut(parent).set_child(from, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(parent));
        }

        self.node_mut(pivot).set_child(from.opposite(), Some(parent));
        self.node_mut(pivot).set_parent(grandparent);
        self.node_mut(parent).set_parent(Some(pivot));

        // The old parent is now below the pivot, so it goes first.
        self.update_height(parent);
        self.update_height(pivot);

        match grandparent {
            Some(grandparent) => {
                let side = self.node(grandparent).side_of(parent);
                self.node_mut(grandparent).set_child(side, Some(pivot));
                self.update_height(grandparent);
            }
            None => self.set_root(Some(pivot)),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Key;

    fn key_at(tree: &RawTree, handle: Option<Handle>) -> Option<Key> {
        handle.map(|h| tree.node(h).key())
    }

    #[test]
    fn absent_node_is_balanced() {
        let tree = RawTree::new();
        assert_eq!(tree.balance_index(None), 0);
        assert_eq!(tree.subtree_height(None), 0);
    }

    #[test]
    fn single_left_rotation_on_ascending_keys() {
        let mut tree = RawTree::new();
        for key in [10, 20, 30] {
            tree.try_insert(key).unwrap();
        }
        tree.validate_invariants();

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).key(), 20);
        assert_eq!(tree.node(root).height(), 2);
        assert_eq!(key_at(&tree, tree.node(root).left()), Some(10));
        assert_eq!(key_at(&tree, tree.node(root).right()), Some(30));
        assert_eq!(tree.node(root).parent(), None);
        for child in [tree.node(root).left(), tree.node(root).right()] {
            assert_eq!(tree.subtree_height(child), 1);
        }
    }

    #[test]
    fn single_right_rotation_on_descending_keys() {
        let mut tree = RawTree::new();
        for key in [30, 20, 10] {
            tree.try_insert(key).unwrap();
        }
        tree.validate_invariants();

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).key(), 20);
        assert_eq!(key_at(&tree, tree.node(root).left()), Some(10));
        assert_eq!(key_at(&tree, tree.node(root).right()), Some(30));
    }

    #[test]
    fn left_right_double_rotation() {
        let mut tree = RawTree::new();
        for key in [30, 10, 20] {
            tree.try_insert(key).unwrap();
        }
        tree.validate_invariants();

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).key(), 20);
        assert_eq!(tree.node(root).height(), 2);
        for (child, key) in [(tree.node(root).left(), 10), (tree.node(root).right(), 30)] {
            assert_eq!(key_at(&tree, child), Some(key));
            assert_eq!(tree.subtree_height(child), 1);
            assert_eq!(tree.node(child.unwrap()).parent(), Some(root));
        }
    }

    #[test]
    fn right_left_double_rotation() {
        let mut tree = RawTree::new();
        for key in [10, 30, 20] {
            tree.try_insert(key).unwrap();
        }
        tree.validate_invariants();

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).key(), 20);
        assert_eq!(key_at(&tree, tree.node(root).left()), Some(10));
        assert_eq!(key_at(&tree, tree.node(root).right()), Some(30));
    }

    #[test]
    fn rotation_below_root_relinks_grandparent() {
        let mut tree = RawTree::new();
        for key in [50, 25, 75, 80, 90] {
            tree.try_insert(key).unwrap();
        }
        tree.validate_invariants();

        // 75 was unbalanced; 80 takes its place under the root.
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).key(), 50);
        assert_eq!(tree.node(root).height(), 3);
        let right = tree.node(root).right().unwrap();
        assert_eq!(tree.node(right).key(), 80);
        assert_eq!(tree.node(right).parent(), Some(root));
        assert_eq!(key_at(&tree, tree.node(right).left()), Some(75));
        assert_eq!(key_at(&tree, tree.node(right).right()), Some(90));
    }

    #[test]
    fn rotating_the_root_is_a_no_op() {
        let mut tree = RawTree::new();
        tree.try_insert(1).unwrap();
        let root = tree.root().unwrap();
        tree.rotate_left(root);
        assert_eq!(tree.root(), Some(root));
        tree.validate_invariants();
    }

    #[test]
    fn removal_may_need_more_than_one_fix() {
        // Removing 12 unbalances 11. The rotation there shortens the root's
        // right subtree, which then unbalances the root as well.
        let mut tree = RawTree::new();
        for key in [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1] {
            tree.try_insert(key).unwrap();
        }
        tree.validate_invariants();
        assert_eq!(tree.height(), 5);

        assert!(tree.remove(12));
        tree.validate_invariants();
        assert_eq!(tree.node(tree.root().unwrap()).key(), 5);
    }
}
