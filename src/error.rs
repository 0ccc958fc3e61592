use alloc::collections::TryReserveError;

use thiserror::Error;

/// The error returned by [`OrderedTree::try_insert`](crate::OrderedTree::try_insert).
///
/// A failed insertion leaves the tree exactly as it was.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TryInsertError {
    /// The allocator could not provide room for another node.
    #[error("failed to allocate a tree node: {0}")]
    AllocFailed(#[from] TryReserveError),

    /// Every node handle is already in use.
    #[error("tree is at maximum capacity ({max} nodes)")]
    CapacityExceeded {
        /// The largest number of nodes a tree can hold.
        max: usize,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn capacity_message_names_the_limit() {
        let error = TryInsertError::CapacityExceeded { max: 7 };
        assert_eq!(error.to_string(), "tree is at maximum capacity (7 nodes)");
    }

    #[test]
    fn alloc_failure_converts_from_try_reserve() {
        let mut v: Vec<u64> = Vec::new();
        let reserve_error = v.try_reserve(usize::MAX).unwrap_err();
        let error = TryInsertError::from(reserve_error.clone());
        assert_eq!(error, TryInsertError::AllocFailed(reserve_error));
        assert!(error.to_string().starts_with("failed to allocate a tree node"));
    }
}
