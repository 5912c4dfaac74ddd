//! ArrayPool — a bounded free-list of work buffers (`SPEC_FULL.md` §3,
//! Design Notes §9).
//!
//! The reference system pools arrays by object identity. Here a buffer is
//! acquired by move and returned to the pool by the `Drop` of its guard,
//! so a planner can never forget to release one even on an early error
//! return. Per `spec.md` §5's shared-resource policy the pool itself is
//! single-threaded: all `acquire`/release traffic happens on the
//! orchestrating thread between passes, so a `RefCell` is enough.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::array::VecArray;
use crate::element::Element;

/// A fixed-capacity ring of `VecArray<E>` buffers, all sized for the same
/// array length within one dilation/erosion call.
pub struct ArrayPool<E: Element> {
    capacity: usize,
    free: RefCell<Vec<VecArray<E>>>,
}

impl<E: Element> ArrayPool<E> {
    pub fn new(capacity: usize) -> Self {
        ArrayPool {
            capacity,
            free: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Acquires a zeroed buffer of length `len`, reusing a pooled one of
    /// the same length if available.
    pub fn acquire(&self, len: u64) -> PooledArray<'_, E> {
        let mut free = self.free.borrow_mut();
        let array = match free.iter().position(|a| a.len() == len) {
            Some(idx) => free.swap_remove(idx),
            None => VecArray::new_zeroed(len),
        };
        drop(free);
        PooledArray {
            pool: self,
            array: Some(array),
        }
    }

    fn release(&self, array: VecArray<E>) {
        let mut free = self.free.borrow_mut();
        if free.len() < self.capacity {
            free.push(array);
        }
    }

    /// Number of buffers currently idle in the pool; exposed for tests.
    pub fn free_count(&self) -> usize {
        self.free.borrow().len()
    }
}

/// An `ArrayPool`-owned buffer. Returns itself to the pool on drop.
pub struct PooledArray<'a, E: Element> {
    pool: &'a ArrayPool<E>,
    array: Option<VecArray<E>>,
}

impl<'a, E: Element> Deref for PooledArray<'a, E> {
    type Target = VecArray<E>;
    fn deref(&self) -> &VecArray<E> {
        self.array.as_ref().expect("array taken before drop")
    }
}

impl<'a, E: Element> DerefMut for PooledArray<'a, E> {
    fn deref_mut(&mut self) -> &mut VecArray<E> {
        self.array.as_mut().expect("array taken before drop")
    }
}

impl<'a, E: Element> Drop for PooledArray<'a, E> {
    fn drop(&mut self) {
        if let Some(array) = self.array.take() {
            self.pool.release(array);
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
