use super::handle::Handle;
use super::node::Side;
use super::raw_tree::RawTree;
use crate::Key;

impl RawTree {
    /// Returns the first node holding `key` on the walk down from the root.
    ///
    /// With duplicates present this is whichever equal node is reached first, which
    /// is the one `remove` deletes.
    pub(crate) fn find(&self, key: Key) -> Option<Handle> {
        let mut cursor = self.root();
        while let Some(handle) = cursor {
            let node = self.node(handle);
            if node.key() == key {
                return Some(handle);
            }
            cursor = node.child(Side::of(key, node.key()));
        }
        None
    }

    /// Returns the rightmost node of `handle`'s left subtree.
    ///
    /// A node without a left child is returned unchanged; callers treat that as
    /// "no predecessor below this node".
    pub(crate) fn find_predecessor(&self, handle: Handle) -> Handle {
        let Some(mut current) = self.node(handle).left() else {
            return handle;
        };
        while let Some(right) = self.node(current).right() {
            current = right;
        }
        current
    }

    /// Returns the node a new `key` would hang off, and on which side.
    ///
    /// `None` means the tree is empty and the key becomes the root.
    pub(crate) fn find_slot(&self, key: Key) -> Option<(Handle, Side)> {
        let mut current = self.root()?;
        loop {
            let node = self.node(current);
            let side = Side::of(key, node.key());
            match node.child(side) {
                Some(next) => current = next,
                None => return Some((current, side)),
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn tree_of(keys: &[Key]) -> RawTree {
        let mut tree = RawTree::new();
        for &key in keys {
            tree.try_insert(key).unwrap();
        }
        tree
    }

    #[test]
    fn find_on_empty_tree() {
        let tree = RawTree::new();
        assert_eq!(tree.find(1), None);
        assert_eq!(tree.find_slot(1), None);
    }

    #[test]
    fn find_walks_to_matching_key() {
        let tree = tree_of(&[40, 20, 60, 10, 30, 50, 70]);
        for key in [10, 20, 30, 40, 50, 60, 70] {
            let handle = tree.find(key).expect("inserted key should be found");
            assert_eq!(tree.node(handle).key(), key);
        }
        for key in [0, 15, 45, 80] {
            assert_eq!(tree.find(key), None);
        }
    }

    #[test]
    fn find_reaches_duplicate_moved_left_by_rotation() {
        // The second and third 5 go right; the rotation lifts the middle one and
        // leaves an equal key in the left subtree.
        let tree = tree_of(&[5, 5, 5]);
        let root = tree.root().unwrap();
        assert_eq!(tree.find(5), Some(root));
        assert_eq!(tree.node(tree.node(root).left().unwrap()).key(), 5);
    }

    #[test]
    fn predecessor_is_rightmost_of_left_subtree() {
        let tree = tree_of(&[40, 20, 60, 10, 30, 50, 70]);
        let root = tree.find(40).unwrap();
        assert_eq!(tree.node(tree.find_predecessor(root)).key(), 30);

        let sixty = tree.find(60).unwrap();
        assert_eq!(tree.node(tree.find_predecessor(sixty)).key(), 50);
    }

    #[test]
    fn predecessor_of_node_without_left_child_is_itself() {
        let tree = tree_of(&[40, 20, 60, 10, 30, 50, 70]);
        let leaf = tree.find(10).unwrap();
        assert_eq!(tree.find_predecessor(leaf), leaf);
    }

    #[test]
    fn slot_respects_duplicate_routing() {
        let tree = tree_of(&[20, 10, 30]);
        let (parent, side) = tree.find_slot(20).unwrap();
        assert_eq!(tree.node(parent).key(), 30);
        assert_eq!(side, Side::Left);

        let (parent, side) = tree.find_slot(10).unwrap();
        assert_eq!(tree.node(parent).key(), 10);
        assert_eq!(side, Side::Right);
    }
}
