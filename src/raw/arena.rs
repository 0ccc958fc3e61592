use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::TryInsertError;

/// Slot storage for tree nodes.
///
/// Freed slots are recycled before the backing vector grows, so a handle stays
/// valid until its slot is explicitly taken.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(Handle::MAX)),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element`, reporting allocation failure instead of aborting.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, TryInsertError> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }

        if self.slots.len() >= Handle::MAX {
            return Err(TryInsertError::CapacityExceeded { max: Handle::MAX });
        }
        // Reserve room for the free-list entry too, so that `take` never has to grow.
        // `Clone` keeps this reservation.
        self.slots.try_reserve(1)?;
        self.free.try_reserve(self.slots.len() + 1 - self.free.len())?;
        self.slots.push(Some(element));
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    /// Forgets every slot. Callers that must drop elements one by one take them first.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T: Clone> Clone for Arena<T> {
    fn clone(&self) -> Self {
        let mut free = Vec::with_capacity(self.slots.len());
        free.extend_from_slice(&self.free);
        Self {
            slots: self.slots.clone(),
            free,
        }
    }
}
