use super::handle::Handle;
use crate::Key;

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// The side a new `key` descends to below a node holding `node_key`.
    ///
    /// Equal keys go right, so duplicates keep their insertion order.
    #[inline]
    pub(crate) fn of(key: Key, node_key: Key) -> Self {
        if key < node_key { Side::Left } else { Side::Right }
    }

    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single tree node.
///
/// `left` and `right` are owning links: a node is only reachable through its
/// parent's child slot (or the tree root). `parent` is a plain back-reference
/// used to walk upward while rebalancing.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    key: Key,
    // Height of the subtree rooted here; a leaf is 1, a missing subtree 0.
    height: u8,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl Node {
    /// Creates a detached leaf.
    pub(crate) const fn leaf(key: Key, parent: Option<Handle>) -> Self {
        Self {
            key,
            height: 1,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub(crate) fn set_key(&mut self, key: Key) {
        self.key = key;
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side on which `child` hangs off this node.
    ///
    /// # Panics
    /// If `child` is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Side {
        if self.left == Some(child) {
            Side::Left
        } else if self.right == Some(child) {
            Side::Right
        } else {
            panic!("`Node::side_of()` - `child` is not linked to this node!");
        }
    }
}
