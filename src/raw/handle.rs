use core::num::NonZero;

// Tests use 16-bit handles so that a full tree (`Handle::MAX` nodes) is small
// enough to build; see `raw_tree::tests::full_tree_rejects_insert_without_changing`.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the tree's arena.
///
/// `Handle::MAX` is also the most nodes one tree can hold; `Arena::try_alloc`
/// reports `TryInsertError::CapacityExceeded` past it.
///
/// Zero is reserved so that `Option<Handle>` (used for every child and parent
/// link) costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = index as RawHandle + 1;
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            // `index + 1` is at most `RawHandle::MAX`, never zero.
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
