use core::fmt;

use log::warn;

use crate::Key;
use crate::error::TryInsertError;
use crate::raw::RawTree;

/// The value [`OrderedTree::top`] returns for an empty tree.
///
/// It is an ordinary [`Key`], so a tree whose root holds `100_000` is
/// indistinguishable from an empty one through `top`. Use
/// [`OrderedTree::root_key`] when that matters.
pub const EMPTY_TOP: Key = 100_000;

/// An ordered collection of [`Key`]s backed by an AVL tree.
///
/// Equal keys are all kept: each [`insert`](Self::insert) adds one node and each
/// [`remove`](Self::remove) deletes one.
///
/// # Examples
///
/// ```
/// use avl_index::OrderedTree;
///
/// let mut tree = OrderedTree::from([40, 20, 60, 10, 30, 50, 70]);
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree.height(), 3);
///
/// // The root has two children, so its in-order predecessor takes its place.
/// tree.remove(40);
/// assert_eq!(tree.top(), 30);
/// ```
#[derive(Clone)]
pub struct OrderedTree {
    raw: RawTree,
}

impl OrderedTree {
    /// Makes a new, empty `OrderedTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let tree = OrderedTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OrderedTree {
            raw: RawTree::new(),
        }
    }

    /// Creates an empty tree with room for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let tree = OrderedTree::with_capacity(16);
    /// assert!(tree.capacity() >= 16);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedTree {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns how many keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of keys in the tree, counting duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Adds `key` to the tree. Existing equal keys are kept.
    ///
    /// # Panics
    ///
    /// Panics if memory for the new node cannot be allocated, or if the tree
    /// already holds the maximum number of nodes. See [`try_insert`](Self::try_insert)
    /// for a fallible version.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(37);
    /// assert!(tree.contains(37));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: Key) {
        if let Err(error) = self.raw.try_insert(key) {
            panic!("`OrderedTree::insert()` - {error}");
        }
    }

    /// Adds `key` to the tree, reporting allocation failure instead of panicking.
    ///
    /// On error the tree is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TryInsertError::AllocFailed`] if the allocator cannot provide room
    /// for another node, or [`TryInsertError::CapacityExceeded`] if every node
    /// handle is in use.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.try_insert(5)?;
    /// assert_eq!(tree.top(), 5);
    /// # Ok::<(), avl_index::TryInsertError>(())
    /// ```
    pub fn try_insert(&mut self, key: Key) -> Result<(), TryInsertError> {
        self.raw.try_insert(key).inspect_err(|error| warn!("failed to insert key {key}: {error}"))
    }

    /// Removes one occurrence of `key`. Returns whether the key was present.
    ///
    /// A missing key is not an error; the tree is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let mut tree = OrderedTree::from([2, 2]);
    /// assert!(tree.remove(2));
    /// assert!(tree.contains(2));
    /// assert!(tree.remove(2));
    /// assert!(!tree.remove(2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: Key) -> bool {
        self.raw.remove(key)
    }

    /// Returns `true` if the tree holds at least one `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 2, 3]);
    /// assert!(tree.contains(1));
    /// assert!(!tree.contains(4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.raw.find(key).is_some()
    }

    /// Removes every key, releasing all nodes. Clearing an empty tree does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let mut tree = OrderedTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(!tree.contains(1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the key stored at the root, or [`EMPTY_TOP`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::{EMPTY_TOP, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.top(), EMPTY_TOP);
    /// tree.insert(5);
    /// assert_eq!(tree.top(), 5);
    /// ```
    #[must_use]
    pub fn top(&self) -> Key {
        self.root_key().unwrap_or(EMPTY_TOP)
    }

    /// Returns the key stored at the root, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.root_key(), None);
    /// tree.insert(5);
    /// assert_eq!(tree.root_key(), Some(5));
    /// ```
    #[must_use]
    pub fn root_key(&self) -> Option<Key> {
        self.raw.root_key()
    }
}

impl fmt::Debug for OrderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("root", &self.root_key())
            .finish()
    }
}

impl Default for OrderedTree {
    /// Creates an empty `OrderedTree`.
    fn default() -> OrderedTree {
        OrderedTree::new()
    }
}

impl FromIterator<Key> for OrderedTree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<Key> for OrderedTree {
    #[inline]
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> Extend<&'a Key> for OrderedTree {
    fn extend<I: IntoIterator<Item = &'a Key>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<const N: usize> From<[Key; N]> for OrderedTree {
    /// Inserts the keys of `arr` in array order.
    ///
    /// ```
    /// use avl_index::OrderedTree;
    ///
    /// let tree = OrderedTree::from([30, 10, 20]);
    /// assert_eq!(tree.top(), 20);
    /// ```
    fn from(arr: [Key; N]) -> Self {
        arr.into_iter().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn debug_shows_shape_not_contents() {
        let tree = OrderedTree::from([10, 20, 30]);
        assert_eq!(format!("{tree:?}"), "OrderedTree { len: 3, height: 2, root: Some(20) }");
        assert_eq!(format!("{:?}", OrderedTree::new()), "OrderedTree { len: 0, height: 0, root: None }");
    }

    #[test]
    fn clone_is_independent() {
        let mut original = OrderedTree::from([1, 2, 3]);
        let copy = original.clone();
        original.remove(2);
        assert!(copy.contains(2));
        assert!(!original.contains(2));
    }

    #[test]
    fn extend_by_reference() {
        let mut tree = OrderedTree::default();
        tree.extend(&[3, 1, 2]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.top(), 2);
    }
}
