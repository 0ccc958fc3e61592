//! A height-balanced (AVL) ordered tree of integer keys.
//!
//! [`OrderedTree`] keeps its keys in a binary search tree whose subtree heights
//! never differ by more than one, so [`insert`](OrderedTree::insert),
//! [`remove`](OrderedTree::remove) and [`contains`](OrderedTree::contains) are
//! all O(log n). It is meant as a building block for ordered indexes.
//!
//! # Example
//!
//! ```
//! use avl_index::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key);
//! }
//!
//! // The ascending run was rotated into a balanced shape.
//! assert_eq!(tree.top(), 20);
//! assert_eq!(tree.height(), 2);
//!
//! assert!(tree.contains(30));
//! assert!(tree.remove(30));
//! assert!(!tree.contains(30));
//! ```
//!
//! # Duplicates
//!
//! Keys are not deduplicated. Each `insert` adds one node; an equal key is placed
//! in the right subtree of the node it is compared against. Each `remove` takes
//! away one node.
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Child links own
//! their subtree, parent links are only used to walk back up while rebalancing.
//! Removing a node with two children copies its in-order predecessor's key into
//! it and removes the predecessor instead.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod ordered_tree;

pub use error::TryInsertError;
pub use ordered_tree::{EMPTY_TOP, OrderedTree};

/// The key type stored by [`OrderedTree`].
pub type Key = i64;
