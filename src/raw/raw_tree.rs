use log::debug;
use smallvec::SmallVec;

use super::arena::Arena;
use super::balancer::Rebalance;
use super::handle::Handle;
use super::node::Node;
use crate::Key;
use crate::error::TryInsertError;

/// Stack used while tearing the tree down. It holds at most one pending sibling
/// per level, and an AVL tree of `u32::MAX` nodes is under 48 levels deep.
type Pending = SmallVec<[Handle; 64]>;

/// The AVL tree backing `OrderedTree`.
///
/// Every node lives in `nodes`; the tree reaches them through `root` and the
/// child links. A node's slot is released only by `remove` or `clear`.
#[derive(Clone)]
pub(crate) struct RawTree {
    nodes: Arena<Node>,
    root: Option<Handle>,
}

impl RawTree {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of nodes, one per inserted and not yet removed key.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<Handle>) {
        if let Some(root) = root {
            self.nodes.get_mut(root).set_parent(None);
        }
        self.root = root;
    }

    pub(crate) fn root_key(&self) -> Option<Key> {
        self.root.map(|root| self.node(root).key())
    }

    pub(crate) fn height(&self) -> usize {
        usize::from(self.subtree_height(self.root))
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.nodes.get_mut(handle)
    }

    /// Adds a node for `key`, keeping any existing equal keys.
    ///
    /// On error the tree is unchanged.
    pub(crate) fn try_insert(&mut self, key: Key) -> Result<(), TryInsertError> {
        let slot = self.find_slot(key);
        let handle = self.nodes.try_alloc(Node::leaf(key, slot.map(|(parent, _)| parent)))?;

        match slot {
            None => self.root = Some(handle),
            Some((parent, side)) => {
                self.node_mut(parent).set_child(side, Some(handle));
                // A fresh leaf is balanced; start at its parent.
                self.rebalance(Some(parent), Rebalance::UntilFixed);
            }
        }
        Ok(())
    }

    /// Removes one node holding `key`. Returns `false` if there is none.
    pub(crate) fn remove(&mut self, key: Key) -> bool {
        let Some(mut target) = self.find(key) else {
            return false;
        };

        // A node with two children takes over its predecessor's key, and the
        // predecessor (which has no right child) is removed instead.
        loop {
            let node = self.node(target);
            match (node.left(), node.right()) {
                (Some(_), Some(_)) => {
                    let predecessor = self.find_predecessor(target);
                    let key = self.node(predecessor).key();
                    self.node_mut(target).set_key(key);
                    target = predecessor;
                }
                (left, right) => {
                    self.unlink(target, left.or(right));
                    return true;
                }
            }
        }
    }

    /// Replaces `target` with its only subtree (or nothing) and frees it.
    fn unlink(&mut self, target: Handle, child: Option<Handle>) {
        let parent = self.node(target).parent();
        match parent {
            Some(parent) => {
                let side = self.node(parent).side_of(target);
                self.node_mut(parent).set_child(side, child);
                if let Some(child) = child {
                    self.node_mut(child).set_parent(Some(parent));
                }
            }
            None => self.set_root(child),
        }
        self.nodes.free(target);
        self.rebalance(parent, Rebalance::ToRoot);
    }

    /// Frees every node, visiting each exactly once. Returns how many were freed.
    ///
    /// The walk keeps its own stack, so teardown depth does not depend on the
    /// call stack.
    pub(crate) fn clear(&mut self) -> usize {
        let mut pending: Pending = self.root.take().into_iter().collect();
        let mut freed = 0;

        while let Some(handle) = pending.pop() {
            let node = self.nodes.take(handle);
            pending.extend(node.left());
            pending.extend(node.right());
            freed += 1;
        }

        debug_assert!(self.nodes.is_empty(), "`RawTree::clear()` - unreachable nodes left in the arena!");
        self.nodes.reset();
        if freed > 0 {
            debug!("cleared tree, freed {freed} nodes");
        }
        freed
    }
}
